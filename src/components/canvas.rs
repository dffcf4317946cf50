//! Retained terminal surface for the grid. Stores the last attribute written
//! to each element and paints the scene into a ratatui buffer on demand.

use std::collections::HashMap;

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::grid::{ArrowShape, Attr, Element, Surface};

/// Everything written so far to one element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label_row: f64,
    pub fill: Option<Color>,
    pub label_color: Option<Color>,
    pub label: String,
    pub visible: bool,
    pub arrow: Option<ArrowShape>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            label_row: 0.0,
            fill: None,
            label_color: None,
            label: String::new(),
            visible: true,
            arrow: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Canvas {
    elements: HashMap<Element, ElementState>,
    writes: usize,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, element: Element) -> Option<&ElementState> {
        self.elements.get(&element)
    }

    /// Total attribute writes received since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Editor extent in terminal cells, as last written.
    pub fn size(&self) -> (u16, u16) {
        self.elements
            .get(&Element::Editor)
            .map_or((0, 0), |s| (s.width.round() as u16, s.height.round() as u16))
    }
}

impl Surface for Canvas {
    fn write(&mut self, element: Element, attr: Attr) {
        self.writes += 1;
        let state = self.elements.entry(element).or_default();
        match attr {
            Attr::Position { x, y } => {
                state.x = x;
                state.y = y;
            }
            Attr::Size { width, height } => {
                state.width = width;
                state.height = height;
            }
            Attr::LabelRow(row) => state.label_row = row,
            Attr::Fill(color) => state.fill = Some(color),
            Attr::LabelColor(color) => state.label_color = Some(color),
            Attr::Label(text) => state.label = text,
            Attr::Visible(visible) => state.visible = visible,
            Attr::Arrow(shape) => state.arrow = Some(shape),
        }
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Cells never overlap, so map order does not matter for them.
        for (element, state) in &self.elements {
            if matches!(element, Element::Cell { .. }) && state.visible {
                paint_cell(state, area, buf);
            }
        }
        if let Some(state) = self.visible(Element::BoxHighlight) {
            paint_outline(state, area, buf);
        }
        if let Some(state) = self.visible(Element::Playhead) {
            paint_playhead(state, area, buf);
        }
        if let Some(state) = self.visible(Element::UpArrow) {
            paint_arrow(state, '▲', -1.0, area, buf);
        }
        if let Some(state) = self.visible(Element::DownArrow) {
            paint_arrow(state, '▼', 1.0, area, buf);
        }
    }
}

impl Canvas {
    fn visible(&self, element: Element) -> Option<&ElementState> {
        self.elements.get(&element).filter(|s| s.visible)
    }
}

/// Maps a grid-local position to a buffer position inside `area`.
fn to_screen(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    let (x, y) = (x.floor(), y.floor());
    if x < 0.0 || y < 0.0 || x >= area.width as f64 || y >= area.height as f64 {
        return None;
    }
    Some((area.x + x as u16, area.y + y as u16))
}

fn paint_cell(state: &ElementState, area: Rect, buf: &mut Buffer) {
    let width = state.width.round() as i64;
    let height = state.height.round() as i64;
    for row in 0..height {
        for col in 0..width {
            let Some(pos) = to_screen(area, state.x + col as f64, state.y + row as f64) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(' ');
                if let Some(fill) = state.fill {
                    cell.set_bg(fill);
                }
            }
        }
    }

    let len = state.label.chars().count() as i64;
    let start = (width - len).max(0) / 2;
    for (i, ch) in state.label.chars().enumerate() {
        let x = state.x + (start + i as i64) as f64;
        let Some(pos) = to_screen(area, x, state.y + state.label_row) else {
            continue;
        };
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(ch);
            if let Some(color) = state.label_color {
                cell.set_fg(color);
            }
        }
    }
}

/// Draws box corners and edges on the top and bottom rows, leaving any
/// label characters in place.
fn paint_outline(state: &ElementState, area: Rect, buf: &mut Buffer) {
    let width = state.width.round() as i64;
    let height = state.height.round() as i64;
    if width < 2 || height < 2 {
        return;
    }
    let color = state.fill.unwrap_or(Color::White);
    let rows = [(0, ('┌', '─', '┐')), (height - 1, ('└', '─', '┘'))];
    for (row, (left, mid, right)) in rows {
        for col in 0..width {
            let glyph = if col == 0 {
                left
            } else if col == width - 1 {
                right
            } else {
                mid
            };
            let Some(pos) = to_screen(area, state.x + col as f64, state.y + row as f64) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                if cell.symbol() == " " {
                    cell.set_char(glyph);
                    cell.set_fg(color);
                }
            }
        }
    }
}

fn paint_playhead(state: &ElementState, area: Rect, buf: &mut Buffer) {
    let color = state.fill.unwrap_or(Color::White);
    for row in 0..state.height.round() as i64 {
        let Some(pos) = to_screen(area, state.x, row as f64) else {
            continue;
        };
        if let Some(cell) = buf.cell_mut(pos) {
            if cell.symbol() == " " {
                cell.set_char('│');
            }
            cell.set_fg(color);
        }
    }
}

/// `direction` is -1 for the up arrow (tip above the row centre), +1 for
/// the down arrow.
fn paint_arrow(state: &ElementState, glyph: char, direction: f64, area: Rect, buf: &mut Buffer) {
    let Some(shape) = state.arrow else {
        return;
    };
    let y = shape.middle + direction * shape.tip;
    if let Some(pos) = to_screen(area, shape.center, y) {
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(glyph);
            if let Some(fill) = state.fill {
                cell.set_fg(fill);
            }
        }
    }
}

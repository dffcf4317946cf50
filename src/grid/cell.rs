//! One bar cell of the grid.

use super::{Attr, Element, Surface, BAR_WIDTH, ROW_HEIGHT, SQUASHED_ROW_HEIGHT};
use crate::theme;

/// What a cell last put on the surface. Compared before every write; never
/// read back as song state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellVisual {
    pub pattern_index: usize,
    pub dim: bool,
    pub selected: bool,
}

#[derive(Debug)]
pub struct Cell {
    channel: usize,
    slot: usize,
    rendered: CellVisual,
    squashed: bool,
    visible: bool,
}

impl Cell {
    /// Creates the cell in its initial look: pattern "1", dim, unselected,
    /// on a filled background, unsquashed.
    pub fn new(channel: usize, slot: usize, surface: &mut dyn Surface) -> Self {
        let cell = Self {
            channel,
            slot,
            rendered: CellVisual {
                pattern_index: 1,
                dim: true,
                selected: false,
            },
            squashed: false,
            visible: true,
        };
        let element = cell.element();
        cell.write_geometry(surface);
        surface.write(element, Attr::Fill(theme::FILLED_CELL));
        surface.write(element, Attr::LabelColor(theme::channel_dim(channel)));
        surface.write(element, Attr::Label("1".into()));
        cell
    }

    pub fn element(&self) -> Element {
        Element::Cell {
            channel: self.channel,
            slot: self.slot,
        }
    }

    pub fn rendered(&self) -> CellVisual {
        self.rendered
    }

    pub fn set_geometry(&mut self, squashed: bool, surface: &mut dyn Surface) {
        if self.squashed == squashed {
            return;
        }
        self.squashed = squashed;
        self.write_geometry(surface);
    }

    pub fn set_visible(&mut self, visible: bool, surface: &mut dyn Surface) {
        if self.visible != visible {
            self.visible = visible;
            surface.write(self.element(), Attr::Visible(visible));
        }
    }

    /// Brings the cell to the given state with the fewest writes. The three
    /// diffs are evaluated in order index, dim, selected so that selection
    /// colours override dim colours, which override the index fill.
    pub fn set_state(
        &mut self,
        pattern_index: usize,
        dim: bool,
        selected: bool,
        surface: &mut dyn Surface,
    ) {
        let element = self.element();

        if self.rendered.pattern_index != pattern_index {
            let was_empty = self.rendered.pattern_index == 0;
            if !self.rendered.selected && (pattern_index == 0) != was_empty {
                surface.write(element, Attr::Fill(base_fill(pattern_index)));
            }
            self.rendered.pattern_index = pattern_index;
            surface.write(element, Attr::Label(pattern_index.to_string()));
        }

        if self.rendered.dim != dim {
            self.rendered.dim = dim;
            let color = if selected {
                theme::SELECTED_LABEL
            } else {
                self.label_color(dim)
            };
            surface.write(element, Attr::LabelColor(color));
        }

        if self.rendered.selected != selected {
            self.rendered.selected = selected;
            if selected {
                surface.write(element, Attr::Fill(theme::channel_bright(self.channel)));
                surface.write(element, Attr::LabelColor(theme::SELECTED_LABEL));
            } else {
                surface.write(element, Attr::Fill(base_fill(self.rendered.pattern_index)));
                surface.write(element, Attr::LabelColor(self.label_color(dim)));
            }
        }
    }

    fn label_color(&self, dim: bool) -> ratatui::style::Color {
        if dim {
            theme::channel_dim(self.channel)
        } else {
            theme::channel_bright(self.channel)
        }
    }

    fn write_geometry(&self, surface: &mut dyn Surface) {
        let (row_height, label_row) = if self.squashed {
            (SQUASHED_ROW_HEIGHT, 0.0)
        } else {
            (ROW_HEIGHT, 1.0)
        };
        let element = self.element();
        surface.write(
            element,
            Attr::Position {
                x: self.slot as f64 * BAR_WIDTH,
                y: self.channel as f64 * row_height,
            },
        );
        surface.write(
            element,
            Attr::Size {
                width: BAR_WIDTH - 1.0,
                height: row_height,
            },
        );
        surface.write(element, Attr::LabelRow(label_row));
    }
}

fn base_fill(pattern_index: usize) -> ratatui::style::Color {
    if pattern_index == 0 {
        theme::EMPTY_CELL
    } else {
        theme::FILLED_CELL
    }
}

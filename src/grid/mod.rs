//! The pattern grid: a channels × 16 matrix of bar cells with hover
//! overlays and a playhead.
//!
//! Everything visual goes through the [`Surface`] trait as individual
//! attribute writes against addressable [`Element`]s. Cells cache what they
//! last wrote and skip writes that would not change anything, so a full
//! reconciliation pass over an unchanged grid costs no surface writes.

use ratatui::style::Color;

pub mod cell;
pub mod coalesce;
pub mod controller;
pub mod layout;
pub mod navigator;

pub use cell::{Cell, CellVisual};
pub use coalesce::{DigitEntry, PatternEdits};
pub use controller::{GridController, PointerPresence};
pub use layout::GridLayout;
pub use navigator::{navigate, Direction};

use crate::song::VISIBLE_BARS;

/// Width of one bar column, in terminal cells (including a 1-cell gap).
pub const BAR_WIDTH: f64 = 4.0;
pub const EDITOR_WIDTH: f64 = BAR_WIDTH * VISIBLE_BARS as f64;
/// Height of one channel row.
pub const ROW_HEIGHT: f64 = 3.0;
pub const SQUASHED_ROW_HEIGHT: f64 = 2.0;
/// Songs longer than this switch to squashed rows.
pub const SQUASH_THRESHOLD: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Editor,
    Cell { channel: usize, slot: usize },
    BoxHighlight,
    UpArrow,
    DownArrow,
    Playhead,
}

/// Triangle geometry for the increment/decrement affordance. `middle` is
/// the row centre; the tip sits `tip` away from it, the base `base` away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowShape {
    pub center: f64,
    pub middle: f64,
    pub base: f64,
    pub tip: f64,
    pub half_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Attr {
    Position { x: f64, y: f64 },
    Size { width: f64, height: f64 },
    /// Row of the label relative to the element's top.
    LabelRow(f64),
    Fill(Color),
    LabelColor(Color),
    Label(String),
    Visible(bool),
    Arrow(ArrowShape),
}

/// Sink for visual attribute writes.
pub trait Surface {
    fn write(&mut self, element: Element, attr: Attr);
}

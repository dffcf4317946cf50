pub mod app;
pub mod grid;
pub mod song;
pub mod theme;

pub mod components {
    pub mod canvas;
    pub mod header;
    pub mod status;
}

pub mod format;
pub mod sprite;
pub mod theme;

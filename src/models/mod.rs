pub mod config;
pub mod history;
pub mod pixel_grid;
pub mod point;
pub mod prediction;

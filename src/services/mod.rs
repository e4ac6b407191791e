pub mod canvas;
pub mod classifier;
pub mod config;
pub mod downsample;
pub mod history_store;
pub mod json_file;
pub mod pad;
pub mod rank;
pub mod recognizer;

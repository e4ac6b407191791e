pub mod commands;
pub mod models;
pub mod services;
pub mod utils;

pub use commands::AppContext;
pub use models::config::AppConfig;
pub use models::pixel_grid::{PixelGrid, GRID_LEN, GRID_SIDE};
pub use models::prediction::{ClassProbability, Prediction, RankedResult};
pub use services::classifier::{Classifier, ClassifierError, HttpClassifier};
pub use services::downsample::DownsampleService;
pub use services::pad::{reduce, PadEvent, PadState, RecognitionStatus};
pub use services::rank::top_k;

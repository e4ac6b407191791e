use super::error::ClassifierError;
use crate::models::pixel_grid::PixelGrid;
use async_trait::async_trait;

/// Validated answer from a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub pred: u8,
    /// Per-class probabilities, index = class label
    pub probs: Vec<f64>,
    pub time_ms: u64,
}

/// Classifier trait - abstraction over where inference actually runs
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one 28x28 grid
    async fn classify(&self, grid: &PixelGrid) -> Result<Classification, ClassifierError>;

    /// Check that the classifier is reachable, returning its greeting
    async fn health_check(&self) -> Result<String, ClassifierError>;
}

use crate::models::config::RecognitionConfig;
use crate::models::pixel_grid::PixelGrid;
use crate::models::prediction::Prediction;
use crate::services::classifier::{Classifier, ClassifierError};
use crate::services::downsample::DownsampleService;
use crate::services::pad::{reduce, PadEvent, PadState};
use crate::services::rank::top_k;
use image::DynamicImage;
use tracing::{info, warn};

/// Downsample → classify → rank
pub struct Recognizer<C: Classifier> {
    classifier: C,
    downsample: DownsampleService,
    top_k: usize,
}

impl<C: Classifier> Recognizer<C> {
    pub fn new(classifier: C, config: &RecognitionConfig) -> Self {
        Self {
            classifier,
            downsample: DownsampleService::new(config.filter),
            top_k: config.top_k,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Grid the classifier would receive for `image`
    pub fn grid_for(&self, image: &DynamicImage) -> PixelGrid {
        self.downsample.downsample(image)
    }

    /// Recognize the digit drawn on `image`
    pub async fn recognize(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError> {
        let grid = self.grid_for(image);
        self.recognize_grid(&grid).await
    }

    /// Classify an already downsampled grid
    pub async fn recognize_grid(&self, grid: &PixelGrid) -> Result<Prediction, ClassifierError> {
        let classification = self.classifier.classify(grid).await?;

        Ok(Prediction {
            pred: classification.pred,
            top: top_k(&classification.probs, self.top_k),
            time_ms: classification.time_ms,
        })
    }

    /// Run one recognition against the pad, threading the outcome through the reducer
    pub async fn recognize_pad(&self, state: PadState) -> PadState {
        let state = reduce(state, PadEvent::RecognitionStarted);
        let image = state.surface.to_dynamic_image();

        let event = match self.recognize(&image).await {
            Ok(prediction) => {
                info!(pred = prediction.pred, time_ms = prediction.time_ms, "recognized digit");
                PadEvent::RecognitionSucceeded {
                    prediction,
                    at: timestamp_now(),
                }
            }
            Err(e) => {
                warn!(error = %e, "recognition failed");
                PadEvent::RecognitionFailed(e.to_string())
            }
        };

        reduce(state, event)
    }
}

/// Local wall-clock time used to stamp history entries
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CanvasConfig;
    use crate::models::history::History;
    use crate::models::point::Point;
    use crate::models::prediction::ClassProbability;
    use crate::services::classifier::test_support::StubClassifier;
    use crate::services::pad::{reduce_all, stroke_events, RecognitionStatus};

    const PROBS: [f64; 10] = [0.1, 0.05, 0.7, 0.02, 0.03, 0.0, 0.0, 0.0, 0.0, 0.1];

    fn drawn_state() -> PadState {
        let state = PadState::new(&CanvasConfig::default(), History::default()).unwrap();
        reduce_all(
            state,
            stroke_events(&[Point::new(140.0, 40.0), Point::new(140.0, 240.0)]),
        )
    }

    #[test]
    fn test_recognize_ranks_top_k() {
        let recognizer = Recognizer::new(
            StubClassifier::answering(2, PROBS.to_vec()),
            &RecognitionConfig::default(),
        );

        let prediction = tokio_test::block_on(
            recognizer.recognize(&drawn_state().surface.to_dynamic_image()),
        )
        .unwrap();

        assert_eq!(prediction.pred, 2);
        assert_eq!(prediction.time_ms, 5);
        assert_eq!(
            prediction.top.as_slice(),
            &[
                ClassProbability::new(2, 0.7),
                ClassProbability::new(0, 0.1),
                ClassProbability::new(9, 0.1),
            ]
        );
    }

    #[test]
    fn test_top_k_is_configurable() {
        let config = RecognitionConfig {
            top_k: 5,
            ..RecognitionConfig::default()
        };
        let recognizer = Recognizer::new(StubClassifier::answering(2, PROBS.to_vec()), &config);

        let grid = recognizer.grid_for(&drawn_state().surface.to_dynamic_image());
        let prediction = tokio_test::block_on(recognizer.recognize_grid(&grid)).unwrap();

        assert_eq!(prediction.top.len(), 5);
    }

    #[test]
    fn test_recognize_pad_success_records_history() {
        let recognizer = Recognizer::new(
            StubClassifier::answering(2, PROBS.to_vec()),
            &RecognitionConfig::default(),
        );

        let state = tokio_test::block_on(recognizer.recognize_pad(drawn_state()));

        assert!(matches!(state.status, RecognitionStatus::Done(ref p) if p.pred == 2));
        assert_eq!(state.history.len(), 1);
        assert_eq!(recognizer.classifier().calls(), 1);
    }

    #[test]
    fn test_recognize_pad_failure_surfaces_message() {
        let recognizer = Recognizer::new(
            StubClassifier::failing(ClassifierError::Server("Server error".to_string())),
            &RecognitionConfig::default(),
        );

        let state = tokio_test::block_on(recognizer.recognize_pad(drawn_state()));

        assert_eq!(
            state.status,
            RecognitionStatus::Failed("Server error".to_string())
        );
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}

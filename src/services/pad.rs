//! Pad state and its transition function
//!
//! All user input and recognition progress is expressed as a [`PadEvent`];
//! [`reduce`] consumes the current [`PadState`] and returns the next one.
//! Side effects (network, persistence) live with the caller.

use crate::models::config::CanvasConfig;
use crate::models::history::{History, HistoryEntry};
use crate::models::point::Point;
use crate::models::prediction::Prediction;
use crate::services::canvas::DrawingSurface;
use image::DynamicImage;

/// What the result panel currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecognitionStatus {
    #[default]
    Idle,
    Loading,
    Done(Prediction),
    Failed(String),
}

/// Input and recognition events that drive the pad
#[derive(Debug, Clone)]
pub enum PadEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Clear,
    ImageLoaded(DynamicImage),
    RecognitionStarted,
    RecognitionSucceeded { prediction: Prediction, at: String },
    RecognitionFailed(String),
}

/// Everything the pad shows: surface, pen state, result and history
#[derive(Clone)]
pub struct PadState {
    pub surface: DrawingSurface,
    pub drawing: bool,
    pub status: RecognitionStatus,
    pub history: History,
}

impl PadState {
    pub fn new(canvas: &CanvasConfig, history: History) -> Result<Self, String> {
        Ok(Self {
            surface: DrawingSurface::new(canvas)?,
            drawing: false,
            status: RecognitionStatus::Idle,
            history,
        })
    }
}

/// Apply one event, returning the next state
pub fn reduce(mut state: PadState, event: PadEvent) -> PadState {
    match event {
        PadEvent::PointerDown(point) => {
            state.drawing = true;
            state.surface.begin_stroke(point);
        }
        PadEvent::PointerMove(point) => {
            if state.drawing {
                state.surface.extend_stroke(point);
            }
        }
        PadEvent::PointerUp => {
            state.drawing = false;
            state.surface.end_stroke();
        }
        PadEvent::Clear => {
            state.drawing = false;
            state.surface.clear();
            state.status = RecognitionStatus::Idle;
        }
        PadEvent::ImageLoaded(image) => {
            state.drawing = false;
            state.surface.place_image(&image);
        }
        PadEvent::RecognitionStarted => {
            state.status = RecognitionStatus::Loading;
        }
        PadEvent::RecognitionSucceeded { prediction, at } => {
            state.history.push(HistoryEntry::from_prediction(&prediction, at));
            state.status = RecognitionStatus::Done(prediction);
        }
        PadEvent::RecognitionFailed(message) => {
            state.status = RecognitionStatus::Failed(message);
        }
    }

    state
}

/// Apply a sequence of events in order
pub fn reduce_all(state: PadState, events: impl IntoIterator<Item = PadEvent>) -> PadState {
    events.into_iter().fold(state, reduce)
}

/// Events for one pointer stroke through `points`
pub fn stroke_events(points: &[Point]) -> Vec<PadEvent> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(points.len() + 1);
    events.push(PadEvent::PointerDown(*first));
    events.extend(rest.iter().map(|p| PadEvent::PointerMove(*p)));
    // A single tap still leaves a dot
    if rest.is_empty() {
        events.push(PadEvent::PointerMove(*first));
    }
    events.push(PadEvent::PointerUp);
    events
}

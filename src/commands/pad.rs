use super::AppContext;
use crate::models::point::Point;
use crate::services::classifier::Classifier;
use crate::services::pad::{reduce, reduce_all, stroke_events, PadEvent, PadState, RecognitionStatus};
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// Parse a stroke written as "x,y x,y ..." (points may also be separated by ';')
pub fn parse_stroke(text: &str) -> Result<Vec<Point>, String> {
    let points = text
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|token| !token.is_empty())
        .map(Point::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if points.is_empty() {
        return Err(format!("Stroke has no points: '{}'", text));
    }

    Ok(points)
}

/// Replay pointer strokes onto the pad
pub fn apply_strokes(state: PadState, strokes: &[Vec<Point>]) -> PadState {
    strokes.iter().fold(state, |state, stroke| {
        debug!(points = stroke.len(), "replaying stroke");
        reduce_all(state, stroke_events(stroke))
    })
}

/// Decode any raster format `image` understands
pub fn open_image(path: &Path) -> Result<DynamicImage, String> {
    let image = image::open(path).map_err(|e| format!("Failed to open image {:?}: {}", path, e))?;
    debug!(width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Decode an image file and place it centered on the pad
pub fn load_image(state: PadState, path: &Path) -> Result<PadState, String> {
    let image = open_image(path)?;
    Ok(reduce(state, PadEvent::ImageLoaded(image)))
}

/// Recognize the current pad and persist history on success
pub async fn recognize<C: Classifier>(ctx: &AppContext<C>, state: PadState) -> Result<PadState, String> {
    let state = ctx.recognizer.recognize_pad(state).await;

    if matches!(state.status, RecognitionStatus::Done(_)) {
        ctx.store.save(&state.history)?;
    }

    Ok(state)
}

/// Load `path` onto the pad and recognize it
pub async fn recognize_file<C: Classifier>(
    ctx: &AppContext<C>,
    state: PadState,
    path: &Path,
) -> Result<PadState, String> {
    let state = load_image(state, path)?;
    recognize(ctx, state).await
}

/// Human readable form of the result panel
pub fn status_report(status: &RecognitionStatus) -> String {
    match status {
        RecognitionStatus::Idle => "Nothing recognized yet".to_string(),
        RecognitionStatus::Loading => "Recognizing...".to_string(),
        RecognitionStatus::Done(prediction) => prediction.report(),
        RecognitionStatus::Failed(message) => format!("Error: {}", message),
    }
}

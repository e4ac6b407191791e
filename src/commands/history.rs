use super::AppContext;
use crate::models::history::History;
use crate::services::classifier::Classifier;
use crate::services::pad::PadState;

/// Numbered summary lines, newest first
pub fn history_lines(history: &History) -> Vec<String> {
    if history.is_empty() {
        return vec!["No recognitions yet".to_string()];
    }

    history
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>2}. {}", i + 1, entry.summary()))
        .collect()
}

/// Empty the history and persist the empty list
pub fn clear_history<C: Classifier>(ctx: &AppContext<C>, mut state: PadState) -> Result<PadState, String> {
    state.history.clear();
    ctx.store.save(&state.history)?;
    Ok(state)
}

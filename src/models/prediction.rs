use serde::{Deserialize, Serialize};

/// Probability assigned to a single digit class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassProbability {
    pub digit: u8,
    pub prob: f64,
}

impl ClassProbability {
    pub fn new(digit: u8, prob: f64) -> Self {
        Self { digit, prob }
    }

    /// Probability as a percentage with one decimal, e.g. "70.0%"
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.prob * 100.0)
    }
}

/// Top-K classes ordered by descending probability
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RankedResult(Vec<ClassProbability>);

impl RankedResult {
    pub fn new(pairs: Vec<ClassProbability>) -> Self {
        Self(pairs)
    }

    pub fn as_slice(&self) -> &[ClassProbability] {
        &self.0
    }

    /// Highest ranked class, if any
    pub fn best(&self) -> Option<&ClassProbability> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of one successful recognition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub pred: u8,
    pub top: RankedResult,
    pub time_ms: u64,
}

impl Prediction {
    /// Multi-line report: headline followed by the ranked list
    pub fn report(&self) -> String {
        let mut lines = vec![format!("Prediction: {} ({} ms)", self.pred, self.time_ms)];
        for (rank, class) in self.top.as_slice().iter().enumerate() {
            lines.push(format!("  {}. {}: {}", rank + 1, class.digit, class.percent()));
        }
        lines.join("\n")
    }
}

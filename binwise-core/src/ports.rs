//! Traits describing external collaborators and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};

use crate::footprint::FootprintReport;
use crate::quiz::QuizAnswers;

/// Minimum confidence the image classifier must report before a prediction is used.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the footprint scoring backend.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Required questionnaire answers are blank.
    #[error("Missing required answers: {}", .0.join("; "))]
    MissingAnswers(Vec<String>),
    /// The backend answered without any text.
    #[error("Scoring backend returned no text")]
    EmptyResponse,
    /// The backend text is not a usable footprint report.
    #[error("Invalid footprint report: {0}")]
    InvalidReport(String),
    /// No scoring backend is configured.
    #[error("No footprint scorer configured")]
    Unavailable,
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One prediction from the external image classifier.
pub struct Prediction {
    /// Class label, e.g. `Plastic`.
    pub label: String,
    /// Probability in `0.0..=1.0`.
    pub confidence: f32,
}

impl Prediction {
    /// Construct a prediction.
    #[must_use]
    pub fn new<L: Into<String>>(label: L, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Parse a feed line of the form `<label> <confidence>`, e.g. `E-waste 0.91`.
    ///
    /// The label may contain spaces; the confidence is the last token. Blank
    /// lines, `#` comments, and out-of-range confidences yield `None`.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (label, confidence) = trimmed.rsplit_once(char::is_whitespace)?;
        let confidence = confidence.parse::<f32>().ok()?;
        let label = label.trim();
        if label.is_empty() || !(0.0..=1.0).contains(&confidence) {
            return None;
        }
        Some(Self::new(label, confidence))
    }

    /// Whether the prediction is confident enough to act on.
    #[must_use]
    pub fn passes(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

#[async_trait]
/// Trait for backends that turn questionnaire answers into a footprint report.
pub trait FootprintPort: Send + Sync {
    /// Short backend name for logs and status lines.
    fn name(&self) -> &str;

    /// Score a completed questionnaire.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the answer is not a valid report.
    async fn score(&self, answers: &QuizAnswers) -> Result<FootprintReport, PortError>;
}

//! Carbon-footprint report contract, prompt construction, and response parsing.

use serde::{Deserialize, Serialize};

use crate::ports::PortError;
use crate::quiz::QuizAnswers;

/// Average emissions of one person per year, in tonnes CO2e.
pub const AVERAGE_ANNUAL_TONNES: f64 = 4.8;

/// Mid-range lifetime emissions of one person, in tonnes CO2e.
pub const AVERAGE_LIFETIME_TONNES: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Lifetime footprint estimate returned by the scoring backend.
pub struct FootprintReport {
    /// Estimated lifetime emissions in tonnes CO2e.
    #[serde(rename = "totalCO2Lifetime")]
    pub total_co2_lifetime: f64,
    /// Percentage above (positive) or below (negative) the average person.
    pub percent_above_average: f64,
    /// The two largest contributors.
    pub top_contributors: [String; 2],
    /// Three suggestions for reducing emissions.
    pub recommendations: [String; 3],
}

impl FootprintReport {
    /// Whether the estimate is above the average person.
    #[must_use]
    pub fn is_above_average(&self) -> bool {
        self.percent_above_average > 0.0
    }

    /// Check the values a backend could get wrong.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::InvalidReport`] for negative or non-finite numbers
    /// and blank contributor or recommendation text.
    pub fn validate(&self) -> Result<(), PortError> {
        if !self.total_co2_lifetime.is_finite() || self.total_co2_lifetime < 0.0 {
            return Err(PortError::InvalidReport(format!(
                "total must be a non-negative number, got {}",
                self.total_co2_lifetime
            )));
        }
        if !self.percent_above_average.is_finite() {
            return Err(PortError::InvalidReport(
                "percentage above average is not a number".to_owned(),
            ));
        }
        let blank = self
            .top_contributors
            .iter()
            .chain(&self.recommendations)
            .any(|entry| entry.trim().is_empty());
        if blank {
            return Err(PortError::InvalidReport(
                "contributors and recommendations must not be blank".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Build the instruction sent to a text-completion model.
///
/// # Errors
///
/// Returns [`PortError::Internal`] if the answers cannot be encoded as JSON.
pub fn build_prompt(answers: &QuizAnswers) -> Result<String, PortError> {
    let data = serde_json::to_string_pretty(answers)
        .map_err(|err| PortError::Internal(format!("Failed to encode answers: {err}")))?;

    Ok(format!(
        "Estimate the total lifetime carbon footprint (in tonnes CO2 equivalent) of a person \
given the lifestyle data below. The average person emits {AVERAGE_ANNUAL_TONNES} tonnes \
per year and about {AVERAGE_LIFETIME_TONNES} tonnes over a lifetime.

Respond with ONLY a JSON object of this exact shape:
{{
  \"totalCO2Lifetime\": <number, tonnes>,
  \"percentAboveAverage\": <number, negative when below average>,
  \"topContributors\": [<string>, <string>],
  \"recommendations\": [<string>, <string>, <string>]
}}

Data:
{data}
"
    ))
}

/// Locate the JSON object in model output.
///
/// Prefers a fenced ```` ```json ```` block and otherwise takes the text
/// between the first `{` and the last `}`.
#[must_use]
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some((_, after_fence)) = text.split_once("```json")
        && let Some((body, _)) = after_fence.split_once("```")
    {
        return Some(body.trim());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Parse and validate a footprint report from model output.
///
/// # Errors
///
/// Returns [`PortError::EmptyResponse`] for blank text and
/// [`PortError::InvalidReport`] when no valid report can be read.
pub fn parse_report(text: &str) -> Result<FootprintReport, PortError> {
    if text.trim().is_empty() {
        return Err(PortError::EmptyResponse);
    }

    let json = extract_json(text)
        .ok_or_else(|| PortError::InvalidReport("no JSON object in response".to_owned()))?;
    let report: FootprintReport =
        serde_json::from_str(json).map_err(|err| PortError::InvalidReport(err.to_string()))?;
    report.validate()?;
    Ok(report)
}

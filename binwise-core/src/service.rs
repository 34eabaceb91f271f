//! High-level service facade combining the catalog store and the footprint scorer.

use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::classify::{classify_label, classify_query};
use crate::footprint::FootprintReport;
use crate::model::{ClassificationResult, RegionCatalog, RegionCode, SearchOutcome};
use crate::ports::{FootprintPort, PortError, Prediction};
use crate::quiz::{QUESTIONNAIRE, QuizAnswers, QuizSection, missing_required};

/// Public entry point for bin lookups and footprint scoring.
pub struct BinwiseService {
    catalogs: Arc<CatalogStore>,
    scorer: Option<Arc<dyn FootprintPort>>,
}

impl BinwiseService {
    /// Create a new service bound to the provided catalog store.
    #[must_use]
    pub fn new(catalogs: Arc<CatalogStore>) -> Self {
        Self {
            catalogs,
            scorer: None,
        }
    }

    /// Attach a footprint scoring backend.
    #[must_use]
    pub fn with_scorer(mut self, scorer: Arc<dyn FootprintPort>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// List all regions and their display names, pinned region first.
    #[must_use]
    pub fn regions(&self) -> Vec<(RegionCode, String)> {
        self.catalogs
            .regions()
            .into_iter()
            .map(|meta| (meta.code, meta.name))
            .collect()
    }

    /// Catalog used for a region code, the default region's for unknown codes.
    #[must_use]
    pub fn catalog(&self, region: &RegionCode) -> &RegionCatalog {
        self.catalogs.catalog(region)
    }

    /// Catalog for a region code, `None` when the region is not known.
    #[must_use]
    pub fn lookup(&self, region: &RegionCode) -> Option<&RegionCatalog> {
        self.catalogs.lookup(region)
    }

    /// Recommend a bin for an image classifier label.
    #[must_use]
    pub fn classify_label(&self, region: &RegionCode, label: &str) -> ClassificationResult {
        classify_label(self.catalog(region), label)
    }

    /// Recommend a bin for a typed query.
    #[must_use]
    pub fn classify_query(&self, region: &RegionCode, query: &str) -> SearchOutcome {
        classify_query(self.catalog(region), query)
    }

    /// Recommend a bin for a prediction, ignoring it below `min_confidence`.
    #[must_use]
    pub fn classify_prediction(
        &self,
        region: &RegionCode,
        prediction: &Prediction,
        min_confidence: f32,
    ) -> Option<ClassificationResult> {
        if !prediction.passes(min_confidence) {
            debug!(
                label = %prediction.label,
                confidence = prediction.confidence,
                "prediction below threshold"
            );
            return None;
        }
        Some(self.classify_label(region, &prediction.label))
    }

    /// The carbon-footprint questionnaire.
    #[must_use]
    pub fn questionnaire(&self) -> &'static [QuizSection] {
        QUESTIONNAIRE
    }

    /// Validate answers and score them with the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::MissingAnswers`] when required answers are blank,
    /// [`PortError::Unavailable`] when no backend is attached, and otherwise
    /// whatever the backend reports.
    pub async fn score_footprint(
        &self,
        answers: &QuizAnswers,
    ) -> Result<FootprintReport, PortError> {
        let missing = missing_required(answers);
        if !missing.is_empty() {
            return Err(PortError::MissingAnswers(
                missing.into_iter().map(str::to_owned).collect(),
            ));
        }

        let scorer = self.scorer.as_ref().ok_or(PortError::Unavailable)?;
        info!(backend = scorer.name(), answers = answers.len(), "scoring footprint");
        let report = scorer.score(answers).await?;
        report.validate()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::model::{BinDefinition, MaterialClass};

    struct FixedScorer {
        report: FootprintReport,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FootprintPort for FixedScorer {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn score(&self, _answers: &QuizAnswers) -> Result<FootprintReport, PortError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.report.clone())
        }
    }

    fn report(total: f64) -> FootprintReport {
        FootprintReport {
            total_co2_lifetime: total,
            percent_above_average: -10.0,
            top_contributors: ["Heating".to_owned(), "Driving".to_owned()],
            recommendations: ["Insulate".to_owned(), "Cycle".to_owned(), "Eat local".to_owned()],
        }
    }

    fn bin(name: &str, description: &str) -> BinDefinition {
        BinDefinition {
            name: name.to_owned(),
            color: "gray".to_owned(),
            description: description.to_owned(),
            example_items: Vec::new(),
            notes: None,
        }
    }

    fn service() -> BinwiseService {
        let us = RegionCatalog {
            code: RegionCode::new("US"),
            name: "United States".to_owned(),
            bins: vec![
                bin("Recycling", "Paper, plastic, glass and metal cans"),
                bin("Trash", "Landfill"),
            ],
            keywords: BTreeMap::new(),
        };
        let store = CatalogStore::new(vec![us], &RegionCode::new("US")).expect("valid store");
        BinwiseService::new(Arc::new(store))
    }

    fn complete_answers() -> QuizAnswers {
        QUESTIONNAIRE
            .iter()
            .flat_map(|section| section.fields.iter())
            .map(|field| (field.name, field.options.first().copied().unwrap_or("42")))
            .collect()
    }

    #[test]
    fn low_confidence_predictions_are_ignored() {
        let service = service();
        let region = RegionCode::new("US");
        let weak = Prediction::new("Glass", 0.5);
        let strong = Prediction::new("Glass", 0.95);

        assert!(service.classify_prediction(&region, &weak, 0.8).is_none());
        let result = service
            .classify_prediction(&region, &strong, 0.8)
            .expect("confident prediction");
        assert_eq!(result.material, MaterialClass::Glass);
        assert_eq!(result.bin.name, "Recycling");
    }

    #[test]
    fn unknown_region_uses_default_catalog() {
        let service = service();
        let result = service.classify_label(&RegionCode::new("ZZ"), "Paper");
        assert_eq!(result.bin.name, "Recycling");
    }

    #[tokio::test]
    async fn missing_answers_never_reach_the_backend() {
        let scorer = Arc::new(FixedScorer {
            report: report(250.0),
            calls: AtomicUsize::new(0),
        });
        let service = service().with_scorer(scorer.clone());

        let err = service
            .score_footprint(&QuizAnswers::new())
            .await
            .expect_err("blank sheet");
        assert!(matches!(err, PortError::MissingAnswers(ref labels) if !labels.is_empty()));
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn complete_answers_are_scored() {
        let scorer = Arc::new(FixedScorer {
            report: report(250.0),
            calls: AtomicUsize::new(0),
        });
        let service = service().with_scorer(scorer.clone());

        let scored = service
            .score_footprint(&complete_answers())
            .await
            .expect("scored");
        assert!(!scored.is_above_average());
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_backend_report_is_rejected() {
        let scorer = Arc::new(FixedScorer {
            report: report(f64::NAN),
            calls: AtomicUsize::new(0),
        });
        let service = service().with_scorer(scorer);

        let err = service
            .score_footprint(&complete_answers())
            .await
            .expect_err("nan total");
        assert!(matches!(err, PortError::InvalidReport(_)));
    }

    #[tokio::test]
    async fn no_backend_is_unavailable() {
        let err = service()
            .score_footprint(&complete_answers())
            .await
            .expect_err("no scorer");
        assert!(matches!(err, PortError::Unavailable));
    }
}

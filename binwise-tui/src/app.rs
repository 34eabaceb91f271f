use std::sync::Arc;

use binwise_core::{BinwiseService, DisplayState, Prediction, RegionCode};
use chrono::{DateTime, Local};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    RegionSelect,
    Lookup,
}

/// Most recent prediction from the feed, whether or not it was used.
#[derive(Debug, Clone)]
pub(crate) struct ScanEntry {
    pub prediction: Prediction,
    pub received_at: DateTime<Local>,
    pub accepted: bool,
}

pub(crate) struct App {
    pub service: Arc<BinwiseService>,

    pub screen: Screen,
    pub regions: Vec<(RegionCode, String)>,
    pub region_list_index: usize,
    pub selected_region: Option<RegionCode>,

    pub query: String,
    pub display: DisplayState,
    pub last_scan: Option<ScanEntry>,
    pub min_confidence: f32,
    pub feed_label: Option<String>,

    /// Transient notice shown in the status bar.
    pub status_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<BinwiseService>,
        min_confidence: f32,
        feed_label: Option<String>,
    ) -> Self {
        let regions = service.regions();
        Self {
            service,
            screen: Screen::RegionSelect,
            regions,
            region_list_index: 0,
            selected_region: None,
            query: String::new(),
            display: DisplayState::new(),
            last_scan: None,
            min_confidence,
            feed_label,
            status_message: None,
        }
    }

    pub(crate) fn select_current_region(&mut self) {
        if let Some((code, _name)) = self.regions.get(self.region_list_index) {
            self.selected_region = Some(code.clone());
            self.screen = Screen::Lookup;
            self.status_message = None;
        }
    }

    pub(crate) fn back_to_regions(&mut self) {
        self.screen = Screen::RegionSelect;
        self.selected_region = None;
        self.query.clear();
        self.display.clear();
        self.last_scan = None;
    }

    pub(crate) fn region_name(&self) -> &str {
        self.selected_region
            .as_ref()
            .and_then(|selected| self.regions.iter().find(|(code, _)| code == selected))
            .map_or("<no region>", |(_, name)| name.as_str())
    }

    /// Re-classify the search box; called after every edit.
    pub(crate) fn on_query_changed(&mut self) {
        let Some(region) = &self.selected_region else {
            return;
        };
        let outcome = if self.query.trim().is_empty() {
            None
        } else {
            Some(self.service.classify_query(region, &self.query))
        };
        self.display.on_search(outcome);
    }

    /// Feed a classifier prediction through the confidence gate.
    pub(crate) fn on_prediction(&mut self, prediction: Prediction) {
        let Some(region) = &self.selected_region else {
            debug!(label = %prediction.label, "prediction before region selection, ignored");
            self.status_message = Some(format!(
                "Scan of {} ignored, select a region first",
                prediction.label
            ));
            return;
        };

        let result = self
            .service
            .classify_prediction(region, &prediction, self.min_confidence);
        let accepted = result.is_some();
        if let Some(result) = result {
            self.display.on_scan(result);
        }

        self.last_scan = Some(ScanEntry {
            prediction,
            received_at: Local::now(),
            accepted,
        });
    }

    /// The feed task ended and no more predictions will arrive.
    pub(crate) fn on_feed_closed(&mut self) {
        if let Some(feed) = self.feed_label.take() {
            self.status_message = Some(format!("Prediction feed {feed} stopped"));
        }
    }
}

#[cfg(test)]
mod tests {
    use binwise_core::{DisplaySource, MaterialClass, Visible};

    use super::*;

    fn app() -> App {
        let store = binwise_regions::store().expect("built-in store");
        App::new(Arc::new(BinwiseService::new(store)), 0.8, None)
    }

    fn app_in(code: &str) -> App {
        let mut app = app();
        app.region_list_index = app
            .regions
            .iter()
            .position(|(region, _)| region.as_str() == code)
            .expect("region listed");
        app.select_current_region();
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for character in text.chars() {
            app.query.push(character);
            app.on_query_changed();
        }
    }

    fn shown_material(app: &App) -> Option<(DisplaySource, MaterialClass)> {
        match app.display.visible() {
            Visible::Bin(source, result) => Some((source, result.material)),
            Visible::Waiting(_) | Visible::NotFound => None,
        }
    }

    #[test]
    fn default_region_is_offered_first() {
        let app = app();
        assert_eq!(
            app.regions.first().map(|(code, _)| code.as_str()),
            Some("US")
        );
    }

    #[test]
    fn typing_classifies_every_keystroke() {
        let mut app = app_in("DE");
        assert_eq!(app.region_name(), "Germany");

        type_text(&mut app, "gla");
        assert_eq!(app.display.visible(), Visible::NotFound);

        type_text(&mut app, "ss");
        assert_eq!(
            shown_material(&app),
            Some((DisplaySource::Search, MaterialClass::Glass))
        );
    }

    #[test]
    fn confident_scan_takes_over_and_clearing_search_keeps_it() {
        let mut app = app_in("US");
        type_text(&mut app, "banana");

        app.on_prediction(Prediction::new("Metal", 0.95));
        assert_eq!(
            shown_material(&app),
            Some((DisplaySource::Scan, MaterialClass::Metal))
        );

        type_text(&mut app, " peel");
        assert_eq!(
            shown_material(&app),
            Some((DisplaySource::Search, MaterialClass::Organic))
        );

        app.query.clear();
        app.on_query_changed();
        assert_eq!(
            shown_material(&app),
            Some((DisplaySource::Scan, MaterialClass::Metal))
        );
    }

    #[test]
    fn weak_scan_is_recorded_but_not_shown() {
        let mut app = app_in("US");
        app.on_prediction(Prediction::new("Glass", 0.42));

        assert!(app.last_scan.as_ref().is_some_and(|scan| !scan.accepted));
        assert_eq!(app.display.visible(), Visible::Waiting(DisplaySource::Search));
    }

    #[test]
    fn predictions_wait_for_a_region() {
        let mut app = app();
        app.on_prediction(Prediction::new("Glass", 0.99));
        assert!(app.last_scan.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Scan of Glass ignored, select a region first")
        );

        app.select_current_region();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn closed_feed_is_reported_once() {
        let store = binwise_regions::store().expect("built-in store");
        let mut app = App::new(
            Arc::new(BinwiseService::new(store)),
            0.8,
            Some("scans.txt".to_owned()),
        );

        app.on_feed_closed();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Prediction feed scans.txt stopped")
        );
        assert!(app.feed_label.is_none());

        app.status_message = None;
        app.on_feed_closed();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn closing_without_a_feed_says_nothing() {
        let mut app = app();
        app.on_feed_closed();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn going_back_forgets_the_lookup() {
        let mut app = app_in("JP");
        type_text(&mut app, "paper");
        app.back_to_regions();

        assert_eq!(app.screen, Screen::RegionSelect);
        assert!(app.query.is_empty());
        assert_eq!(app.display.visible(), Visible::Waiting(DisplaySource::Search));
    }
}

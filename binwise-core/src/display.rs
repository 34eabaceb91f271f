//! Which input source owns the result panel: the camera scan or the search box.
//!
//! The last input event wins. A scan result takes over the panel, a search
//! keystroke takes it back, and clearing the search box hands it to the scan.

use serde::{Deserialize, Serialize};

use crate::model::{ClassificationResult, SearchOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Input source whose result is currently shown.
pub enum DisplaySource {
    /// Confident prediction from the image classifier.
    Scan,
    /// Free-text query typed by the user.
    #[default]
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the result panel should render.
pub enum Visible<'state> {
    /// The active source has produced nothing yet.
    Waiting(DisplaySource),
    /// A bin recommendation from the given source.
    Bin(DisplaySource, &'state ClassificationResult),
    /// The search query named no known material.
    NotFound,
}

#[derive(Debug, Clone, Default)]
/// Latest results of both sources plus the one that wins the display.
pub struct DisplayState {
    source: DisplaySource,
    scan: Option<ClassificationResult>,
    search: Option<SearchOutcome>,
}

impl DisplayState {
    /// Fresh state showing the (empty) search source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A confident scan produced a result.
    pub fn on_scan(&mut self, result: ClassificationResult) {
        self.scan = Some(result);
        self.source = DisplaySource::Scan;
    }

    /// The search box changed. `None` means the box is now empty.
    pub fn on_search(&mut self, outcome: Option<SearchOutcome>) {
        self.source = if outcome.is_some() {
            DisplaySource::Search
        } else {
            DisplaySource::Scan
        };
        self.search = outcome;
    }

    /// Forget both results, e.g. after switching region.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The source currently owning the panel.
    #[must_use]
    pub fn source(&self) -> DisplaySource {
        self.source
    }

    /// What to render right now.
    #[must_use]
    pub fn visible(&self) -> Visible<'_> {
        match self.source {
            DisplaySource::Scan => self.scan.as_ref().map_or(
                Visible::Waiting(DisplaySource::Scan),
                |result| Visible::Bin(DisplaySource::Scan, result),
            ),
            DisplaySource::Search => match &self.search {
                Some(SearchOutcome::Found(result)) => Visible::Bin(DisplaySource::Search, result),
                Some(SearchOutcome::NotFound) => Visible::NotFound,
                None => Visible::Waiting(DisplaySource::Search),
            },
        }
    }
}

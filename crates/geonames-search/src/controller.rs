//! Search-as-you-type over a single lookup client
//!
//! Every text change cancels the request in flight before issuing the next
//! one, so the list only ever shows the results for the latest text.

use geonames_client::{
    GeoName, GeoNamesError, GeoNamesLookup, GeoNamesPage, LookupConfig, LookupObserver,
};
use tracing::{debug, warn};

use crate::row::SearchRow;

const DEFAULT_MAX_ROWS: u32 = 20;

/// Callbacks from the controller to whoever presents it
pub trait SearchHost {
    /// Credential for the next query; asked for on every query
    fn username(&mut self) -> String;

    /// The user picked a record, or cancelled (`None`)
    fn did_finish(&mut self, result: Option<GeoName>);

    fn network_activity_changed(&mut self, _is_active: bool) {}

    /// The latest query failed; the list has already been cleared
    fn search_failed(&mut self, _error: &GeoNamesError) {}

    /// The displayed list was replaced
    fn results_changed(&mut self, _rows: &[SearchRow]) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No search text
    Idle,
    /// A request for the current text is in flight
    Searching,
    ShowingResults,
    /// A selection was made or the search was cancelled
    Finished,
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_rows: u32,
    /// `None` returns the service's default (English) names
    pub language: Option<String>,
    pub lookup: LookupConfig,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            language: None,
            lookup: LookupConfig::default(),
        }
    }
}

/// Drives one [`GeoNamesLookup`] from user-entered text
pub struct SearchController<H: SearchHost> {
    host: H,
    options: SearchOptions,
    lookup: Option<GeoNamesLookup>,
    state: SearchState,
    query: String,
    results: Vec<GeoName>,
    rows: Vec<SearchRow>,
    total_results_count: u64,
}

impl<H: SearchHost> SearchController<H> {
    pub fn new(host: H) -> Self {
        Self::with_options(host, SearchOptions::default())
    }

    pub fn with_options(host: H, options: SearchOptions) -> Self {
        Self {
            host,
            options,
            lookup: None,
            state: SearchState::Idle,
            query: String::new(),
            results: Vec::new(),
            rows: Vec::new(),
            total_results_count: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The text of the latest search
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records from the last delivered page
    pub fn results(&self) -> &[GeoName] {
        &self.results
    }

    pub fn rows(&self) -> &[SearchRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_results_count(&self) -> u64 {
        self.total_results_count
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.lookup
            .as_ref()
            .map(GeoNamesLookup::is_in_flight)
            .unwrap_or(false)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// The search text changed
    pub fn text_changed(&mut self, text: &str) {
        if self.state == SearchState::Finished {
            debug!("Ignoring text change after search finished");
            return;
        }

        self.cancel_lookup();

        let text = text.trim();
        if text.is_empty() {
            self.clear();
            return;
        }

        let username = self.host.username();
        let config = self.options.lookup.clone();
        let lookup = self
            .lookup
            .get_or_insert_with(|| GeoNamesLookup::with_config(username.as_str(), config));
        lookup.set_username(username);
        lookup.search(
            text,
            self.options.max_rows,
            0,
            self.options.language.as_deref(),
        );

        self.query = text.to_string();
        self.state = SearchState::Searching;
    }

    /// The search UI was dismissed without finishing
    pub fn search_dismissed(&mut self) {
        if self.state == SearchState::Finished {
            return;
        }
        self.cancel_lookup();
        self.clear();
    }

    /// The user picked row `index` of the displayed list
    ///
    /// Returns `false` when there is no such row.
    pub fn select_row(&mut self, index: usize) -> bool {
        if self.state == SearchState::Finished {
            return false;
        }
        let Some(geoname) = self.results.get(index).cloned() else {
            debug!(index, rows = self.results.len(), "Selected row out of range");
            return false;
        };

        self.cancel_lookup();
        self.state = SearchState::Finished;
        self.host.did_finish(Some(geoname));
        true
    }

    /// The user cancelled the search
    pub fn cancel(&mut self) {
        if self.state == SearchState::Finished {
            return;
        }
        self.cancel_lookup();
        self.state = SearchState::Finished;
        self.host.did_finish(None);
    }

    /// Wait for and apply the next lookup event
    ///
    /// Returns `false` when there is nothing left to wait for.
    pub async fn next_event(&mut self) -> bool {
        let Some(lookup) = self.lookup.as_mut() else {
            return false;
        };
        match lookup.next_event().await {
            Some(event) => {
                event.deliver(self);
                true
            }
            None => false,
        }
    }

    /// Apply the lookup events that are ready now
    pub fn process_ready_events(&mut self) {
        while let Some(event) = self.lookup.as_mut().and_then(GeoNamesLookup::try_next_event) {
            event.deliver(self);
        }
    }

    /// Apply lookup events until the current request has finished
    pub async fn run_until_idle(&mut self) {
        while self.next_event().await {}
    }

    fn cancel_lookup(&mut self) {
        if let Some(lookup) = self.lookup.as_mut() {
            lookup.cancel();
        }
        // Forward the stop of network activity right away
        self.process_ready_events();
    }

    fn clear(&mut self) {
        self.query.clear();
        self.total_results_count = 0;
        self.replace_results(Vec::new());
        self.state = SearchState::Idle;
    }

    fn replace_results(&mut self, results: Vec<GeoName>) {
        self.rows = results.iter().map(SearchRow::from_geoname).collect();
        self.results = results;
        self.host.results_changed(&self.rows);
    }
}

impl<H: SearchHost> LookupObserver for SearchController<H> {
    fn network_activity_changed(&mut self, is_active: bool) {
        self.host.network_activity_changed(is_active);
    }

    fn request_failed(&mut self, error: GeoNamesError) {
        warn!(query = %self.query, error = %error, "GeoNames search failed");
        self.total_results_count = 0;
        self.replace_results(Vec::new());
        self.state = SearchState::ShowingResults;
        self.host.search_failed(&error);
    }

    fn request_succeeded(&mut self, page: GeoNamesPage) {
        debug!(
            query = %self.query,
            returned = page.geonames.len(),
            total = page.total_results_count,
            "GeoNames search finished"
        );
        self.total_results_count = page.total_results_count;
        self.replace_results(page.geonames);
        self.state = SearchState::ShowingResults;
    }
}

//! Single-flight lookup client
//!
//! A [`GeoNamesLookup`] has at most one request in flight. Issuing a new
//! query cancels the active one first. The transport runs on a spawned Tokio
//! task; its outcome only reaches the caller through [`GeoNamesLookup::next_event`]
//! (or its siblings), which run on the caller's task and drop any completion
//! whose generation is no longer current. A cancelled request therefore never
//! produces a result or failure event.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::config::LookupConfig;
use crate::error::{GeoNamesError, Result};
use crate::parse::parse_response;
use crate::query::Query;
use crate::types::GeoNamesPage;

/// Events delivered to the caller, in request order
#[derive(Debug)]
pub enum LookupEvent {
    /// Network activity started (`true`) or stopped (`false`)
    NetworkActivity(bool),
    /// The current request failed
    Failed(GeoNamesError),
    /// The current request finished with results
    Found(GeoNamesPage),
}

impl LookupEvent {
    /// Hand the event to the matching observer hook
    pub fn deliver<O: LookupObserver + ?Sized>(self, observer: &mut O) {
        match self {
            Self::NetworkActivity(is_active) => observer.network_activity_changed(is_active),
            Self::Failed(error) => observer.request_failed(error),
            Self::Found(page) => observer.request_succeeded(page),
        }
    }
}

/// Receiver of lookup events; every hook is optional
pub trait LookupObserver {
    fn network_activity_changed(&mut self, _is_active: bool) {}

    fn request_failed(&mut self, _error: GeoNamesError) {}

    fn request_succeeded(&mut self, _page: GeoNamesPage) {}
}

/// Outcome of one transport task (internal)
struct Completion {
    generation: u64,
    result: Result<GeoNamesPage>,
}

struct InFlight {
    generation: u64,
    task: JoinHandle<()>,
}

/// Client for the GeoNames web services with single-flight request management
///
/// Query methods return immediately and must be called from within a Tokio
/// runtime. Each start of network activity is paired with exactly one stop.
/// A result or failure, if any, is delivered between the two.
pub struct GeoNamesLookup {
    http: reqwest::Client,
    base_url: String,
    username: String,
    generation: u64,
    in_flight: Option<InFlight>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    pending: VecDeque<LookupEvent>,
}

impl GeoNamesLookup {
    /// Create a client for `username` against the public service
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_config(username, LookupConfig::default())
    }

    pub fn with_config(username: impl Into<String>, config: LookupConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .expect("Failed to create HTTP client");

        Self::with_http_client(username, http, &config.base_url)
    }

    /// Create a client that sends its requests through `http`
    pub fn with_http_client(
        username: impl Into<String>,
        http: reqwest::Client,
        base_url: &str,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            http,
            base_url: base_url.to_string(),
            username: username.into(),
            generation: 0,
            in_flight: None,
            completion_tx,
            completion_rx,
            pending: VecDeque::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Replace the credential used by subsequent requests
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Name of the populated place closest to the position (WGS84)
    pub fn find_nearby_place_name(&mut self, latitude: f64, longitude: f64) {
        self.request(Query::NearbyPlaceName {
            latitude,
            longitude,
        });
    }

    /// Toponyms within `radius_km` of the position
    pub fn find_nearby_toponyms(
        &mut self,
        latitude: f64,
        longitude: f64,
        max_rows: u32,
        radius_km: f64,
    ) {
        self.request(Query::NearbyToponyms {
            latitude,
            longitude,
            max_rows,
            radius_km,
        });
    }

    /// Wikipedia articles within `radius_km` of the position, in `language`
    pub fn find_nearby_wikipedia(
        &mut self,
        latitude: f64,
        longitude: f64,
        max_rows: u32,
        radius_km: f64,
        language: &str,
    ) {
        self.request(Query::NearbyWikipedia {
            latitude,
            longitude,
            max_rows,
            radius_km,
            language: language.to_string(),
        });
    }

    /// Free-text search; `start_row` pages through larger result sets
    pub fn search(&mut self, query: &str, max_rows: u32, start_row: u32, language: Option<&str>) {
        self.request(Query::Search {
            query: query.to_string(),
            max_rows,
            start_row,
            language: language.map(str::to_string),
        });
    }

    /// Issue `query`, cancelling whatever request is in flight
    pub fn request(&mut self, query: Query) {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        self.pending.push_back(LookupEvent::NetworkActivity(true));

        let url = match query.to_url(&self.base_url, &self.username) {
            Ok(url) => url,
            Err(err) => {
                self.pending.push_back(LookupEvent::Failed(err));
                self.pending.push_back(LookupEvent::NetworkActivity(false));
                return;
            }
        };

        debug!(
            endpoint = query.endpoint(),
            generation, "Starting GeoNames request"
        );

        let http = self.http.clone();
        let completion_tx = self.completion_tx.clone();
        let task = tokio::spawn(async move {
            let result = fetch(&http, url).await;
            // The receiver is gone once the client has been dropped
            let _ = completion_tx.send(Completion { generation, result });
        });

        self.in_flight = Some(InFlight { generation, task });
    }

    /// Abort the request in flight, if any
    ///
    /// No failure is reported for a cancelled request; only the stop of
    /// network activity is.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
            debug!(
                generation = in_flight.generation,
                "Cancelled GeoNames request"
            );
            self.pending.push_back(LookupEvent::NetworkActivity(false));
        }
    }

    /// Wait for the next event
    ///
    /// Returns `None` once the client is idle and every event has been
    /// delivered. Cancel safe.
    pub async fn next_event(&mut self) -> Option<LookupEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let current = self.in_flight.as_ref()?.generation;
            let completion = self.completion_rx.recv().await?;
            self.accept(completion, current);
        }
    }

    /// Next event that is ready now, without waiting
    pub fn try_next_event(&mut self) -> Option<LookupEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            let current = self.in_flight.as_ref()?.generation;
            let completion = self.completion_rx.try_recv().ok()?;
            self.accept(completion, current);
        }
    }

    /// Deliver events to `observer` until the client is idle
    pub async fn run_until_idle<O: LookupObserver + ?Sized>(&mut self, observer: &mut O) {
        while let Some(event) = self.next_event().await {
            event.deliver(observer);
        }
    }

    fn accept(&mut self, completion: Completion, current: u64) {
        if completion.generation != current {
            debug!(
                generation = completion.generation,
                current, "Discarding superseded GeoNames response"
            );
            return;
        }

        self.in_flight = None;
        let event = match completion.result {
            Ok(page) => LookupEvent::Found(page),
            Err(err) => {
                debug!(generation = current, error = %err, "GeoNames request failed");
                LookupEvent::Failed(err)
            }
        };
        self.pending.push_back(event);
        self.pending.push_back(LookupEvent::NetworkActivity(false));
    }
}

impl Drop for GeoNamesLookup {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}

/// Perform the request, accumulating the body as it streams in
async fn fetch(http: &reqwest::Client, url: Url) -> Result<GeoNamesPage> {
    let mut response = http
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;
    let status = response.status();

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
    }

    match parse_response(&body) {
        Ok(page) if status.is_success() => Ok(page),
        Err(GeoNamesError::Service(err)) => Err(GeoNamesError::Service(err)),
        _ if !status.is_success() => Err(GeoNamesError::HttpStatus(status.as_u16())),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query as QueryParams;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::keys;

    async fn search_handler(
        QueryParams(params): QueryParams<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        let q = params.get("q").cloned().unwrap_or_default();
        if q.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        match q.as_str() {
            "limit" => Json(json!({
                "status": {"message": "daily limit exceeded", "value": 18}
            })),
            "whoami" => Json(json!({
                "geonames": [{"name": params.get("username").cloned().unwrap_or_default()}]
            })),
            _ => Json(json!({
                "totalResultsCount": 5,
                "geonames": [
                    {"name": q, "lat": "52.52", "lng": "13.40"},
                    {"name": format!("{} Mitte", q)}
                ]
            })),
        }
    }

    async fn place_name_handler() -> Json<serde_json::Value> {
        Json(json!({
            "geonames": [{"name": "Mitte", "lat": "52.52", "lng": "13.405", "distance": "0.5"}]
        }))
    }

    async fn wikipedia_handler(
        QueryParams(params): QueryParams<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        Json(json!({
            "geonames": [{
                "title": "Fernsehturm Berlin",
                "summary": "A television tower.",
                "wikipediaUrl": "en.wikipedia.org/wiki/Fernsehturm_Berlin",
                "lang": params.get("lang").cloned().unwrap_or_default(),
                "rank": 100,
                "lat": 52.5208,
                "lng": 13.4094
            }]
        }))
    }

    async fn toponyms_handler() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "oops")
    }

    async fn spawn_service() -> String {
        let app = Router::new()
            .route("/searchJSON", get(search_handler))
            .route("/findNearbyPlaceNameJSON", get(place_name_handler))
            .route("/findNearbyWikipediaJSON", get(wikipedia_handler))
            .route("/findNearbyJSON", get(toponyms_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn lookup() -> GeoNamesLookup {
        let base_url = spawn_service().await;
        GeoNamesLookup::with_config("demo", LookupConfig::with_base_url(&base_url))
    }

    fn describe(event: &LookupEvent) -> String {
        match event {
            LookupEvent::NetworkActivity(true) => "active".to_string(),
            LookupEvent::NetworkActivity(false) => "inactive".to_string(),
            LookupEvent::Found(page) => format!(
                "found:{}:{}",
                page.geonames[0].name().unwrap_or_default(),
                page.total_results_count
            ),
            LookupEvent::Failed(GeoNamesError::Service(err)) => format!("failed:{}", err.code),
            LookupEvent::Failed(GeoNamesError::HttpStatus(status)) => {
                format!("failed:status:{}", status)
            }
            LookupEvent::Failed(err) if err.is_transport() => "failed:transport".to_string(),
            LookupEvent::Failed(err) => format!("failed:{}", err),
        }
    }

    async fn drain(lookup: &mut GeoNamesLookup) -> Vec<String> {
        let mut events = Vec::new();
        while let Some(event) = lookup.next_event().await {
            events.push(describe(&event));
        }
        events
    }

    #[tokio::test]
    async fn test_success_is_bracketed_by_activity() {
        let mut lookup = lookup().await;
        lookup.find_nearby_place_name(52.52, 13.405);
        assert!(lookup.is_in_flight());

        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "found:Mitte:1", "inactive"]);
        assert!(!lookup.is_in_flight());
    }

    #[tokio::test]
    async fn test_only_last_search_delivers() {
        let mut lookup = lookup().await;
        lookup.search("slow-first", 10, 0, None);
        lookup.search("slow-second", 10, 0, None);
        lookup.search("Berlin", 10, 0, None);

        let events = drain(&mut lookup).await;
        assert_eq!(
            events,
            vec![
                "active",
                "inactive",
                "active",
                "inactive",
                "active",
                "found:Berlin:5",
                "inactive"
            ]
        );

        // Nothing from the superseded requests turns up later
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(lookup.try_next_event().is_none());
    }

    #[tokio::test]
    async fn test_cancel_when_idle_is_silent() {
        let mut lookup = lookup().await;
        lookup.cancel();
        lookup.cancel();
        assert!(lookup.try_next_event().is_none());
        assert!(lookup.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_in_flight_reports_only_stop() {
        let mut lookup = lookup().await;
        lookup.search("slow", 10, 0, None);
        lookup.cancel();
        assert!(!lookup.is_in_flight());

        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "inactive"]);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(lookup.try_next_event().is_none());
    }

    #[tokio::test]
    async fn test_cancel_after_response_arrived_discards_it() {
        let mut lookup = lookup().await;
        lookup.search("Berlin", 10, 0, None);
        assert_eq!(
            lookup.next_event().await.map(|e| describe(&e)).as_deref(),
            Some("active")
        );

        // Let the response land in the channel without draining it
        tokio::time::sleep(Duration::from_millis(200)).await;
        lookup.cancel();

        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["inactive"]);
    }

    #[tokio::test]
    async fn test_service_error() {
        let mut lookup = lookup().await;
        lookup.search("limit", 10, 0, None);
        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "failed:18", "inactive"]);
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let mut lookup = lookup().await;
        lookup.find_nearby_toponyms(52.52, 13.405, 10, 1.0);
        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "failed:status:500", "inactive"]);
    }

    #[tokio::test]
    async fn test_transport_error() {
        let mut lookup =
            GeoNamesLookup::with_config("demo", LookupConfig::with_base_url("http://127.0.0.1:1"));
        lookup.find_nearby_place_name(0.0, 0.0);
        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "failed:transport", "inactive"]);
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_without_network() {
        let mut lookup =
            GeoNamesLookup::with_config("demo", LookupConfig::with_base_url("not a url"));
        lookup.search("Berlin", 10, 0, None);
        assert!(!lookup.is_in_flight());
        let events = drain(&mut lookup).await;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], "active");
        assert!(events[1].starts_with("failed:Invalid base URL"));
        assert_eq!(events[2], "inactive");
    }

    #[tokio::test]
    async fn test_set_username_applies_to_next_request() {
        let mut lookup = lookup().await;
        lookup.set_username("alice");
        assert_eq!(lookup.username(), "alice");
        lookup.search("whoami", 1, 0, None);
        let events = drain(&mut lookup).await;
        assert_eq!(events, vec!["active", "found:alice:1", "inactive"]);
    }

    #[derive(Default)]
    struct Recorder {
        activity: Vec<bool>,
        pages: Vec<GeoNamesPage>,
        failures: usize,
    }

    impl LookupObserver for Recorder {
        fn network_activity_changed(&mut self, is_active: bool) {
            self.activity.push(is_active);
        }

        fn request_failed(&mut self, _error: GeoNamesError) {
            self.failures += 1;
        }

        fn request_succeeded(&mut self, page: GeoNamesPage) {
            self.pages.push(page);
        }
    }

    #[tokio::test]
    async fn test_wikipedia_through_observer() {
        let mut lookup = lookup().await;
        let mut recorder = Recorder::default();
        lookup.find_nearby_wikipedia(52.52, 13.405, 5, 2.0, "de");
        lookup.run_until_idle(&mut recorder).await;

        assert_eq!(recorder.activity, vec![true, false]);
        assert_eq!(recorder.failures, 0);
        assert_eq!(recorder.pages.len(), 1);
        let article = &recorder.pages[0].geonames[0];
        assert_eq!(article.title(), Some("Fernsehturm Berlin"));
        assert_eq!(article.get_str(keys::LANGUAGE), Some("de"));
        assert!(article.contains_key(keys::SUMMARY));
        assert!(article.contains_key(keys::WIKIPEDIA_URL));
        assert!(article.contains_key(keys::RANK));
    }

    struct Silent;

    impl LookupObserver for Silent {}

    #[tokio::test]
    async fn test_observer_hooks_are_optional() {
        let mut lookup = lookup().await;
        lookup.search("Berlin", 10, 0, Some("en"));
        lookup.run_until_idle(&mut Silent).await;
        assert!(!lookup.is_in_flight());
    }
}

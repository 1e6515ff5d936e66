//! GeoNames Lookup Client
//!
//! A Rust client for the [GeoNames](https://www.geonames.org/export/ws-overview.html)
//! place-lookup web services: nearby place name, nearby toponyms, nearby
//! Wikipedia articles and free-text search.
//!
//! Requests are single-flight. Starting a query cancels the one in flight,
//! and results arrive as [`LookupEvent`]s on the caller's task.
//!
//! # Example
//!
//! ```no_run
//! use geonames_client::{GeoNamesLookup, LookupEvent};
//!
//! # async fn example() {
//! let mut lookup = GeoNamesLookup::new("demo");
//! lookup.search("Berlin, hospital, wisconsin", 10, 0, None);
//!
//! while let Some(event) = lookup.next_event().await {
//!     if let LookupEvent::Found(page) = event {
//!         for geoname in &page.geonames {
//!             println!("{:?}", geoname.name());
//!         }
//!     }
//! }
//! # }
//! ```

mod config;
mod error;
mod fields;
pub mod keys;
mod lookup;
mod parse;
mod query;
mod types;

pub use config::{LookupConfig, DEFAULT_BASE_URL};
pub use error::{GeoNamesError, Result, ServiceError, ServiceErrorKind};
pub use lookup::{GeoNamesLookup, LookupEvent, LookupObserver};
pub use parse::parse_response;
pub use query::Query;
pub use types::{AlternateName, GeoName, GeoNamesPage, TimeZoneInfo};

//! GeoNames Search Controller
//!
//! Headless search-as-you-type over [`geonames_client::GeoNamesLookup`].
//! A presentation layer forwards text changes and row selections into a
//! [`SearchController`] and renders its [`SearchRow`]s. The host supplies the
//! credential and receives the final selection through [`SearchHost`].

mod controller;
mod row;

pub use controller::{SearchController, SearchHost, SearchOptions, SearchState};
pub use row::SearchRow;

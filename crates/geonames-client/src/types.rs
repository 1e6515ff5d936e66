//! Records delivered to callers
//!
//! A [`GeoName`] is a flat mapping keyed by the constants in [`crate::keys`].
//! Which keys are present depends on the endpoint that produced it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys;

/// One place, toponym or Wikipedia article returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoName {
    fields: Map<String, Value>,
}

impl GeoName {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    pub fn geoname_id(&self) -> Option<i64> {
        self.get_i64(keys::GEONAME_ID)
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str(keys::NAME)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.get_f64(keys::LATITUDE)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.get_f64(keys::LONGITUDE)
    }

    pub fn country_name(&self) -> Option<&str> {
        self.get_str(keys::COUNTRY_NAME)
    }

    /// Wikipedia article title (Wikipedia queries only)
    pub fn title(&self) -> Option<&str> {
        self.get_str(keys::TITLE)
    }

    /// Alternate names in the order the service listed them
    pub fn alternate_names(&self) -> Vec<AlternateName> {
        self.fields
            .get(keys::ALTERNATE_NAMES)
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|entry| {
                        let name = entry.get(keys::ALTERNATE_NAME)?.as_str()?;
                        Some(AlternateName {
                            name: name.to_string(),
                            language: entry
                                .get(keys::ALTERNATE_LANGUAGE)
                                .and_then(Value::as_str)
                                .map(str::to_string),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn time_zone(&self) -> Option<TimeZoneInfo> {
        let tz = self.fields.get(keys::TIME_ZONE)?.as_object()?;
        Some(TimeZoneInfo {
            time_zone_id: tz
                .get(keys::TIME_ZONE_ID)
                .and_then(Value::as_str)
                .map(str::to_string),
            gmt_offset: tz.get(keys::TIME_ZONE_GMT_OFFSET).and_then(Value::as_f64),
            dst_offset: tz.get(keys::TIME_ZONE_DST_OFFSET).and_then(Value::as_f64),
        })
    }
}

impl From<Map<String, Value>> for GeoName {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// A name for the place in another language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateName {
    pub name: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeZoneInfo {
    pub time_zone_id: Option<String>,
    pub gmt_offset: Option<f64>,
    pub dst_offset: Option<f64>,
}

/// Ordered records plus the total number the service has for the query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoNamesPage {
    pub geonames: Vec<GeoName>,
    /// May exceed `geonames.len()`; request further pages with `start_row`
    pub total_results_count: u64,
}

impl GeoNamesPage {
    pub fn len(&self) -> usize {
        self.geonames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geonames.is_empty()
    }

    /// Start row for the page after this one, or `None` when nothing is left
    pub fn next_start_row(&self, start_row: u32) -> Option<u32> {
        let next = u64::from(start_row) + self.geonames.len() as u64;
        if self.geonames.is_empty() || next >= self.total_results_count {
            return None;
        }
        u32::try_from(next).ok()
    }
}

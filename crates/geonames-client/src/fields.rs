//! Translation from service field names to stable record keys

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::keys;
use crate::types::GeoName;

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Text,
    Float,
    Integer,
    AlternateNames,
    TimeZone,
}

/// Service field name, stable key, value kind
const FIELD_MAP: &[(&str, &str, FieldKind)] = &[
    ("geonameId", keys::GEONAME_ID, FieldKind::Integer),
    // the Wikipedia endpoints spell it differently
    ("geoNameId", keys::GEONAME_ID, FieldKind::Integer),
    ("name", keys::NAME, FieldKind::Text),
    ("toponymName", keys::TOPONYM_NAME, FieldKind::Text),
    ("lat", keys::LATITUDE, FieldKind::Float),
    ("lng", keys::LONGITUDE, FieldKind::Float),
    ("countryCode", keys::COUNTRY_CODE, FieldKind::Text),
    ("countryName", keys::COUNTRY_NAME, FieldKind::Text),
    ("continentCode", keys::CONTINENT_CODE, FieldKind::Text),
    ("adminCode1", keys::ADMIN_CODE1, FieldKind::Text),
    ("adminCode2", keys::ADMIN_CODE2, FieldKind::Text),
    ("adminCode3", keys::ADMIN_CODE3, FieldKind::Text),
    ("adminCode4", keys::ADMIN_CODE4, FieldKind::Text),
    ("adminName1", keys::ADMIN_NAME1, FieldKind::Text),
    ("adminName2", keys::ADMIN_NAME2, FieldKind::Text),
    ("adminName3", keys::ADMIN_NAME3, FieldKind::Text),
    ("adminName4", keys::ADMIN_NAME4, FieldKind::Text),
    ("population", keys::POPULATION, FieldKind::Integer),
    ("elevation", keys::ELEVATION, FieldKind::Integer),
    ("distance", keys::DISTANCE, FieldKind::Float),
    ("score", keys::SCORE, FieldKind::Float),
    ("fcl", keys::FEATURE_CLASS, FieldKind::Text),
    ("fcode", keys::FEATURE_CODE, FieldKind::Text),
    ("fclName", keys::FEATURE_CLASS_NAME, FieldKind::Text),
    ("fcodeName", keys::FEATURE_NAME, FieldKind::Text),
    ("alternateNames", keys::ALTERNATE_NAMES, FieldKind::AlternateNames),
    ("timezone", keys::TIME_ZONE, FieldKind::TimeZone),
    ("title", keys::TITLE, FieldKind::Text),
    ("summary", keys::SUMMARY, FieldKind::Text),
    ("wikipediaUrl", keys::WIKIPEDIA_URL, FieldKind::Text),
    ("lang", keys::LANGUAGE, FieldKind::Text),
    ("rank", keys::RANK, FieldKind::Integer),
    ("feature", keys::FEATURE, FieldKind::Text),
];

/// Build a record from one entry of the service's `geonames` array
///
/// Fields the table does not know are dropped, as are numeric fields whose
/// value cannot be read as a number.
pub(crate) fn map_entry(entry: &Map<String, Value>) -> GeoName {
    let mut geoname = GeoName::new();

    for (field, key, kind) in FIELD_MAP {
        let Some(raw) = entry.get(*field) else {
            continue;
        };
        match convert(raw, *kind) {
            Some(value) => geoname.insert(*key, value),
            None => debug!(field = *field, value = %raw, "Dropping unreadable field"),
        }
    }

    geoname
}

fn convert(raw: &Value, kind: FieldKind) -> Option<Value> {
    match kind {
        FieldKind::Text => text(raw).map(Value::String),
        FieldKind::Float => float(raw).and_then(Number::from_f64).map(Value::Number),
        FieldKind::Integer => integer(raw).map(Value::from),
        FieldKind::AlternateNames => alternate_names(raw),
        FieldKind::TimeZone => time_zone(raw),
    }
}

fn text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn float(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn alternate_names(raw: &Value) -> Option<Value> {
    let names = raw.as_array()?;
    let mapped = names
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name").and_then(text)?;
            let mut alternate = Map::new();
            alternate.insert(keys::ALTERNATE_NAME.to_string(), Value::String(name));
            if let Some(lang) = entry.get("lang").and_then(text) {
                alternate.insert(keys::ALTERNATE_LANGUAGE.to_string(), Value::String(lang));
            }
            Some(Value::Object(alternate))
        })
        .collect();
    Some(Value::Array(mapped))
}

fn time_zone(raw: &Value) -> Option<Value> {
    let tz = raw.as_object()?;
    let mut mapped = Map::new();
    if let Some(id) = tz.get("timeZoneId").and_then(text) {
        mapped.insert(keys::TIME_ZONE_ID.to_string(), Value::String(id));
    }
    for (field, key) in [
        ("gmtOffset", keys::TIME_ZONE_GMT_OFFSET),
        ("dstOffset", keys::TIME_ZONE_DST_OFFSET),
    ] {
        if let Some(offset) = tz.get(field).and_then(float).and_then(Number::from_f64) {
            mapped.insert(key.to_string(), Value::Number(offset));
        }
    }
    Some(Value::Object(mapped))
}

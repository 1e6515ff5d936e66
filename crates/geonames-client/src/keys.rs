//! Stable keys for the fields of a [`GeoName`](crate::GeoName) record
//!
//! These stay the same regardless of how the service spells the field in a
//! particular endpoint's response.

pub const GEONAME_ID: &str = "geoname_id";
pub const NAME: &str = "name";
pub const TOPONYM_NAME: &str = "toponym_name";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

pub const COUNTRY_CODE: &str = "country_code";
pub const COUNTRY_NAME: &str = "country_name";
pub const CONTINENT_CODE: &str = "continent_code";

pub const ADMIN_CODE1: &str = "admin_code1";
pub const ADMIN_CODE2: &str = "admin_code2";
pub const ADMIN_CODE3: &str = "admin_code3";
pub const ADMIN_CODE4: &str = "admin_code4";
pub const ADMIN_NAME1: &str = "admin_name1";
pub const ADMIN_NAME2: &str = "admin_name2";
pub const ADMIN_NAME3: &str = "admin_name3";
pub const ADMIN_NAME4: &str = "admin_name4";

pub const POPULATION: &str = "population";
pub const ELEVATION: &str = "elevation";
pub const DISTANCE: &str = "distance";
pub const SCORE: &str = "score";

pub const FEATURE_CLASS: &str = "feature_class";
pub const FEATURE_CODE: &str = "feature_code";
pub const FEATURE_CLASS_NAME: &str = "feature_class_name";
pub const FEATURE_NAME: &str = "feature_name";

/// List of `{name, language}` mappings
pub const ALTERNATE_NAMES: &str = "alternate_names";
pub const ALTERNATE_NAME: &str = "name";
pub const ALTERNATE_LANGUAGE: &str = "language";

/// Nested `{time_zone_id, gmt_offset, dst_offset}` mapping
pub const TIME_ZONE: &str = "time_zone";
pub const TIME_ZONE_ID: &str = "time_zone_id";
pub const TIME_ZONE_GMT_OFFSET: &str = "gmt_offset";
pub const TIME_ZONE_DST_OFFSET: &str = "dst_offset";

// Wikipedia requests only
pub const TITLE: &str = "title";
pub const SUMMARY: &str = "summary";
pub const WIKIPEDIA_URL: &str = "wikipedia_url";
pub const LANGUAGE: &str = "language";
pub const RANK: &str = "rank";
pub const FEATURE: &str = "feature";

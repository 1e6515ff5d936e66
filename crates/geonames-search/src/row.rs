use geonames_client::{keys, GeoName};

/// What a list presentation shows for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub title: String,
    pub subtitle: String,
}

impl SearchRow {
    /// Title is the place name; subtitle is the first-level admin area and country
    pub fn from_geoname(geoname: &GeoName) -> Self {
        let title = geoname
            .name()
            .or_else(|| geoname.get_str(keys::TOPONYM_NAME))
            .unwrap_or_default()
            .to_string();

        let subtitle = [keys::ADMIN_NAME1, keys::COUNTRY_NAME]
            .into_iter()
            .filter_map(|key| geoname.get_str(key))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self { title, subtitle }
    }
}

//! The query shapes the client can issue, and their request URLs

use url::Url;

use crate::error::Result;

/// Every request asks for the richer field set
const STYLE: &str = "FULL";

/// One request to the service
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    NearbyPlaceName {
        latitude: f64,
        longitude: f64,
    },
    NearbyToponyms {
        latitude: f64,
        longitude: f64,
        max_rows: u32,
        radius_km: f64,
    },
    NearbyWikipedia {
        latitude: f64,
        longitude: f64,
        max_rows: u32,
        radius_km: f64,
        language: String,
    },
    /// Free-text search over all attributes of a place
    ///
    /// Comma-separated terms narrow the search, e.g. `"Berlin, hospital, wisconsin"`.
    /// `language: None` returns the service's default (English) names.
    Search {
        query: String,
        max_rows: u32,
        start_row: u32,
        language: Option<String>,
    },
}

impl Query {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::NearbyPlaceName { .. } => "findNearbyPlaceNameJSON",
            Self::NearbyToponyms { .. } => "findNearbyJSON",
            Self::NearbyWikipedia { .. } => "findNearbyWikipediaJSON",
            Self::Search { .. } => "searchJSON",
        }
    }

    /// Build the request URL, carrying `username` as the credential
    pub fn to_url(&self, base_url: &str, username: &str) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.endpoint()
        ))?;

        {
            let mut pairs = url.query_pairs_mut();
            match self {
                Self::NearbyPlaceName {
                    latitude,
                    longitude,
                } => {
                    pairs
                        .append_pair("lat", &latitude.to_string())
                        .append_pair("lng", &longitude.to_string());
                }
                Self::NearbyToponyms {
                    latitude,
                    longitude,
                    max_rows,
                    radius_km,
                } => {
                    pairs
                        .append_pair("lat", &latitude.to_string())
                        .append_pair("lng", &longitude.to_string())
                        .append_pair("maxRows", &max_rows.to_string())
                        .append_pair("radius", &radius_km.to_string());
                }
                Self::NearbyWikipedia {
                    latitude,
                    longitude,
                    max_rows,
                    radius_km,
                    language,
                } => {
                    pairs
                        .append_pair("lat", &latitude.to_string())
                        .append_pair("lng", &longitude.to_string())
                        .append_pair("maxRows", &max_rows.to_string())
                        .append_pair("radius", &radius_km.to_string())
                        .append_pair("lang", language);
                }
                Self::Search {
                    query,
                    max_rows,
                    start_row,
                    language,
                } => {
                    pairs
                        .append_pair("q", query)
                        .append_pair("maxRows", &max_rows.to_string())
                        .append_pair("startRow", &start_row.to_string());
                    if let Some(lang) = language {
                        pairs.append_pair("lang", lang);
                    }
                }
            }
            pairs
                .append_pair("style", STYLE)
                .append_pair("username", username);
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://api.geonames.org";

    fn search(query: &str) -> Query {
        Query::Search {
            query: query.to_string(),
            max_rows: 10,
            start_row: 0,
            language: None,
        }
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_search_urls_differ_only_in_query_term() {
        let plain = search("Berlin").to_url(BASE, "demo").unwrap();
        let qualified = search("Berlin, hospital, wisconsin")
            .to_url(BASE, "demo")
            .unwrap();

        assert_eq!(plain.path(), "/searchJSON");
        assert_eq!(plain.path(), qualified.path());
        assert_eq!(plain.host_str(), qualified.host_str());

        let plain_pairs = pairs(&plain);
        let qualified_pairs = pairs(&qualified);
        assert_eq!(plain_pairs.len(), qualified_pairs.len());
        for (a, b) in plain_pairs.iter().zip(&qualified_pairs) {
            assert_eq!(a.0, b.0);
            if a.0 == "q" {
                assert_eq!(a.1, "Berlin");
                assert_eq!(b.1, "Berlin, hospital, wisconsin");
            } else {
                assert_eq!(a.1, b.1);
            }
        }
    }

    #[test]
    fn test_search_without_language_omits_lang() {
        let url = search("Berlin").to_url(BASE, "demo").unwrap();
        assert!(!pairs(&url).iter().any(|(k, _)| k == "lang"));
        assert!(url.as_str().contains("startRow=0"));
        assert!(url.as_str().contains("maxRows=10"));
    }

    #[test]
    fn test_search_with_language() {
        let query = Query::Search {
            query: "München".to_string(),
            max_rows: 5,
            start_row: 20,
            language: Some("de".to_string()),
        };
        let url = query.to_url(BASE, "demo").unwrap();
        let pairs = pairs(&url);
        assert!(pairs.contains(&("q".to_string(), "München".to_string())));
        assert!(pairs.contains(&("lang".to_string(), "de".to_string())));
        assert!(pairs.contains(&("startRow".to_string(), "20".to_string())));
    }

    #[test]
    fn test_every_request_carries_credential_and_style() {
        let queries = [
            Query::NearbyPlaceName {
                latitude: 52.52,
                longitude: 13.405,
            },
            Query::NearbyToponyms {
                latitude: 52.52,
                longitude: 13.405,
                max_rows: 10,
                radius_km: 2.5,
            },
            Query::NearbyWikipedia {
                latitude: 52.52,
                longitude: 13.405,
                max_rows: 10,
                radius_km: 2.5,
                language: "en".to_string(),
            },
            search("Berlin"),
        ];
        for query in &queries {
            let url = query.to_url(BASE, "alice").unwrap();
            let pairs = pairs(&url);
            assert!(pairs.contains(&("username".to_string(), "alice".to_string())));
            assert!(pairs.contains(&("style".to_string(), "FULL".to_string())));
            assert_eq!(url.path(), format!("/{}", query.endpoint()));
        }
    }

    #[test]
    fn test_nearby_wikipedia_parameters() {
        let query = Query::NearbyWikipedia {
            latitude: -33.8688,
            longitude: 151.2093,
            max_rows: 3,
            radius_km: 10.0,
            language: "fr".to_string(),
        };
        let url = query.to_url(BASE, "demo").unwrap();
        let pairs = pairs(&url);
        assert!(pairs.contains(&("lat".to_string(), "-33.8688".to_string())));
        assert!(pairs.contains(&("lng".to_string(), "151.2093".to_string())));
        assert!(pairs.contains(&("radius".to_string(), "10".to_string())));
        assert!(pairs.contains(&("lang".to_string(), "fr".to_string())));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let url = search("Berlin")
            .to_url("http://localhost:8080/geonames/", "demo")
            .unwrap();
        assert_eq!(url.path(), "/geonames/searchJSON");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = search("Berlin").to_url("not a url", "demo").unwrap_err();
        assert!(matches!(err, crate::GeoNamesError::InvalidBaseUrl(_)));
    }
}

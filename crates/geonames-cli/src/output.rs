use geonames_client::{keys, GeoName, GeoNamesError, GeoNamesPage, LookupObserver};
use tracing::debug;

/// Format one record as a single line
pub fn describe(geoname: &GeoName) -> String {
    let mut line = geoname
        .title()
        .or_else(|| geoname.name())
        .unwrap_or("(unnamed)")
        .to_string();

    let region: Vec<&str> = [keys::ADMIN_NAME1, keys::COUNTRY_NAME, keys::COUNTRY_CODE]
        .into_iter()
        .filter_map(|key| geoname.get_str(key))
        .filter(|part| !part.is_empty())
        .take(2)
        .collect();
    if !region.is_empty() {
        line.push_str(&format!(" ({})", region.join(", ")));
    }

    if let (Some(lat), Some(lng)) = (geoname.latitude(), geoname.longitude()) {
        line.push_str(&format!(" [{:.5}, {:.5}]", lat, lng));
    }
    if let Some(distance) = geoname.get_f64(keys::DISTANCE) {
        line.push_str(&format!(" {:.2} km", distance));
    }
    if let Some(url) = geoname.get_str(keys::WIKIPEDIA_URL) {
        line.push_str(&format!(" {}", url));
    }

    line
}

/// Prints results of one-shot lookups and keeps the failure for the exit status
#[derive(Default)]
pub struct PrintObserver {
    pub failure: Option<GeoNamesError>,
}

impl LookupObserver for PrintObserver {
    fn network_activity_changed(&mut self, is_active: bool) {
        debug!(is_active, "Network activity changed");
    }

    fn request_failed(&mut self, error: GeoNamesError) {
        self.failure = Some(error);
    }

    fn request_succeeded(&mut self, page: GeoNamesPage) {
        for (index, geoname) in page.geonames.iter().enumerate() {
            println!("{:>3}. {}", index, describe(geoname));
        }
        println!(
            "{} of {} results",
            page.geonames.len(),
            page.total_results_count
        );
    }
}

//! Approximate country centroids, keyed by ISO 3166-1 alpha-3 code.
//!
//! The country map places one marker per country at these coordinates
//! (longitude, latitude in degrees).

/// `(iso3, longitude, latitude)`, sorted by code for binary search.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("ARE", 54.3, 23.9),
    ("ARG", -64.0, -34.0),
    ("ARM", 45.0, 40.1),
    ("AUS", 134.5, -25.7),
    ("AUT", 14.1, 47.6),
    ("BEL", 4.6, 50.6),
    ("BGD", 90.3, 23.8),
    ("BGR", 25.2, 42.8),
    ("BHS", -77.4, 24.5),
    ("BIH", 17.8, 44.2),
    ("BLR", 28.0, 53.5),
    ("BOL", -64.7, -16.7),
    ("BRA", -53.1, -10.8),
    ("CAN", -98.3, 61.4),
    ("CHE", 8.2, 46.8),
    ("CHL", -71.4, -37.7),
    ("CHN", 103.8, 36.6),
    ("COL", -73.1, 3.9),
    ("CRI", -84.2, 9.98),
    ("CYP", 33.0, 35.0),
    ("CZE", 15.3, 49.7),
    ("DEU", 10.4, 51.1),
    ("DNK", 10.0, 56.0),
    ("DOM", -70.5, 18.9),
    ("DZA", 2.6, 28.2),
    ("ECU", -78.4, -1.5),
    ("EGY", 29.9, 26.5),
    ("ESP", -3.6, 40.2),
    ("EST", 25.5, 58.7),
    ("FIN", 26.3, 64.5),
    ("FRA", 2.5, 46.6),
    ("GBR", -2.9, 54.1),
    ("GEO", 43.5, 42.2),
    ("GHA", -1.2, 7.9),
    ("GRC", 22.6, 39.1),
    ("GTM", -90.4, 15.7),
    ("HKG", 114.1, 22.4),
    ("HND", -86.6, 14.8),
    ("HRV", 16.4, 45.1),
    ("HUN", 19.4, 47.2),
    ("IDN", 117.2, -2.2),
    ("IND", 79.6, 22.9),
    ("IRL", -8.1, 53.2),
    ("IRN", 54.3, 32.6),
    ("IRQ", 43.7, 33.0),
    ("ISL", -18.6, 65.0),
    ("ISR", 35.0, 31.5),
    ("ITA", 12.1, 42.8),
    ("JAM", -77.3, 18.1),
    ("JOR", 36.8, 31.2),
    ("JPN", 138.0, 37.6),
    ("KAZ", 67.3, 48.2),
    ("KEN", 37.8, 0.6),
    ("KOR", 127.8, 36.4),
    ("KWT", 47.6, 29.3),
    ("LBN", 35.9, 33.9),
    ("LKA", 80.7, 7.6),
    ("LTU", 23.9, 55.3),
    ("LUX", 6.1, 49.8),
    ("LVA", 24.9, 56.9),
    ("MAR", -6.3, 31.9),
    ("MDA", 28.5, 47.2),
    ("MEX", -102.5, 23.9),
    ("MKD", 21.7, 41.6),
    ("MLT", 14.4, 35.9),
    ("MUS", 57.6, -20.3),
    ("MYS", 109.7, 3.8),
    ("NGA", 8.1, 9.6),
    ("NLD", 5.3, 52.1),
    ("NOR", 15.3, 68.8),
    ("NZL", 171.5, -41.8),
    ("OMN", 56.1, 20.6),
    ("PAK", 69.3, 29.9),
    ("PAN", -80.1, 8.5),
    ("PER", -74.4, -9.2),
    ("PHL", 122.9, 11.8),
    ("POL", 19.4, 52.1),
    ("PRI", -66.5, 18.2),
    ("PRT", -8.5, 39.6),
    ("QAT", 51.2, 25.3),
    ("ROU", 25.0, 45.9),
    ("RUS", 96.7, 61.9),
    ("SAU", 44.5, 24.1),
    ("SGP", 103.8, 1.4),
    ("SLV", -88.9, 13.7),
    ("SRB", 20.8, 44.2),
    ("SVK", 19.5, 48.7),
    ("SVN", 14.8, 46.1),
    ("SWE", 16.7, 62.8),
    ("THA", 101.0, 15.1),
    ("TUN", 9.6, 34.1),
    ("TUR", 35.2, 39.1),
    ("TWN", 121.0, 23.8),
    ("UGA", 32.4, 1.3),
    ("UKR", 31.4, 49.0),
    ("URY", -56.0, -32.8),
    ("USA", -98.6, 39.8),
    ("UZB", 63.1, 41.8),
    ("VEN", -66.2, 7.1),
    ("VNM", 106.3, 16.6),
    ("ZAF", 25.1, -29.0),
];

/// Centroid `(longitude, latitude)` for an ISO3 code, case-insensitive.
pub fn country_centroid(iso3: &str) -> Option<(f64, f64)> {
    let code = iso3.trim().to_ascii_uppercase();
    CENTROIDS
        .binary_search_by(|(c, _, _)| (*c).cmp(code.as_str()))
        .ok()
        .map(|i| (CENTROIDS[i].1, CENTROIDS[i].2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in CENTROIDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        for (code, lon, lat) in CENTROIDS {
            assert!((-180.0..=180.0).contains(lon), "{code}");
            assert!((-90.0..=90.0).contains(lat), "{code}");
        }
    }

    #[test]
    fn test_lookup() {
        let (lon, lat) = country_centroid("bra").unwrap();
        assert!(lon < 0.0 && lat < 0.0);
        assert!(country_centroid("USA").is_some());
        assert!(country_centroid("XXX").is_none());
        assert!(country_centroid("").is_none());
    }
}

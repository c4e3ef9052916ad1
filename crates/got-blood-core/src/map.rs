//! Map Marker Derivation
//!
//! Severity banding, marker filtering, viewport framing and match overlay
//! lines for the hospital map.

use crate::dto::{Coordinates, HospitalLocationEntry, MatchRecord};
use std::collections::HashMap;

/// Stock level band of a hospital, by summed volume in CC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityBand {
    Critical,
    Moderate,
    Low,
    Adequate,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 4] = [
        SeverityBand::Critical,
        SeverityBand::Moderate,
        SeverityBand::Low,
        SeverityBand::Adequate,
    ];

    /// Upper bounds are exclusive: exactly 100 is moderate, not critical
    pub fn from_severity(severity: f64) -> Self {
        if severity < 100.0 {
            SeverityBand::Critical
        } else if severity < 300.0 {
            SeverityBand::Moderate
        } else if severity < 500.0 {
            SeverityBand::Low
        } else {
            SeverityBand::Adequate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::Critical => "Critical",
            SeverityBand::Moderate => "Moderate",
            SeverityBand::Low => "Low",
            SeverityBand::Adequate => "Adequate",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeverityBand::Critical => "#c0392b",
            SeverityBand::Moderate => "#e67e22",
            SeverityBand::Low => "#f1c40f",
            SeverityBand::Adequate => "#27ae60",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            SeverityBand::Critical => "< 100 CC",
            SeverityBand::Moderate => "100 - 299 CC",
            SeverityBand::Low => "300 - 499 CC",
            SeverityBand::Adequate => "500+ CC",
        }
    }
}

/// Hospitals are identified by name and city together
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HospitalKey {
    pub hospital: String,
    pub city: String,
}

impl HospitalKey {
    pub fn of(entry: &HospitalLocationEntry) -> Self {
        Self { hospital: entry.hospital.clone(), city: entry.city.clone() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: HospitalKey,
    pub position: Coordinates,
    pub severity: f64,
    pub band: SeverityBand,
}

impl Marker {
    pub fn popup_html(&self) -> String {
        format!(
            "<strong>{}</strong><br/>{}<br/>Total: {} CC ({})",
            escape_html(&self.key.hospital),
            escape_html(&self.key.city),
            self.severity,
            self.band.label()
        )
    }
}

/// Markers for every entry with a known location
pub fn derive_markers(entries: &[HospitalLocationEntry]) -> Vec<Marker> {
    entries
        .iter()
        .filter(|entry| !entry.coordinates.is_unknown())
        .map(|entry| {
            let severity = entry.shortage_severity();
            Marker {
                key: HospitalKey::of(entry),
                position: entry.coordinates,
                severity,
                band: SeverityBand::from_severity(severity),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Smallest box containing every known position; None when there are none
    pub fn enclosing<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        positions
            .into_iter()
            .filter(|p| !p.is_unknown())
            .fold(None, |acc: Option<BoundingBox>, p| {
                Some(match acc {
                    None => BoundingBox { south: p.lat, west: p.lon, north: p.lat, east: p.lon },
                    Some(b) => BoundingBox {
                        south: b.south.min(p.lat),
                        west: b.west.min(p.lon),
                        north: b.north.max(p.lat),
                        east: b.east.max(p.lon),
                    },
                })
            })
    }

    pub fn of_markers(markers: &[Marker]) -> Option<Self> {
        Self::enclosing(markers.iter().map(|m| &m.position))
    }

    /// `[[south, west], [north, east]]`, the corner order Leaflet expects
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// Overlay segment from a hospital to one of its match candidates
#[derive(Debug, Clone, PartialEq)]
pub struct MatchLine {
    pub from: Coordinates,
    pub to: Coordinates,
    pub source: HospitalKey,
    pub target: String,
}

impl MatchLine {
    pub fn popup_html(&self) -> String {
        format!("{} → {}", escape_html(&self.source.hospital), escape_html(&self.target))
    }
}

/// Lines for every match whose endpoints are both known. Keys without a
/// marker (unknown location) produce nothing.
pub fn match_lines(
    markers: &[Marker],
    matches: &HashMap<HospitalKey, Vec<MatchRecord>>,
) -> Vec<MatchLine> {
    markers
        .iter()
        .flat_map(|marker| {
            matches
                .get(&marker.key)
                .into_iter()
                .flatten()
                .filter(|m| !m.coordinates.is_unknown())
                .map(move |m| MatchLine {
                    from: marker.position,
                    to: m.coordinates,
                    source: marker.key.clone(),
                    target: m.hospital.clone(),
                })
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::BloodVolume;

    fn entry(name: &str, lat: f64, lon: f64, volumes: &[f64]) -> HospitalLocationEntry {
        HospitalLocationEntry {
            hospital: name.to_string(),
            city: "Springfield".to_string(),
            coordinates: Coordinates::new(lat, lon),
            blood_data: volumes
                .iter()
                .map(|v| BloodVolume { blood_type: "O+".to_string(), total_blood_cc: *v })
                .collect(),
        }
    }

    fn match_at(name: &str, lat: f64, lon: f64) -> MatchRecord {
        MatchRecord {
            hospital: name.to_string(),
            city: None,
            coordinates: Coordinates::new(lat, lon),
            total_blood_cc: None,
            distance_km: Some(5.0),
        }
    }

    #[test]
    fn test_band_boundaries_are_exclusive_upper() {
        assert_eq!(SeverityBand::from_severity(0.0), SeverityBand::Critical);
        assert_eq!(SeverityBand::from_severity(99.9), SeverityBand::Critical);
        assert_eq!(SeverityBand::from_severity(100.0), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_severity(299.0), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_severity(300.0), SeverityBand::Low);
        assert_eq!(SeverityBand::from_severity(499.99), SeverityBand::Low);
        assert_eq!(SeverityBand::from_severity(500.0), SeverityBand::Adequate);
    }

    #[test]
    fn test_band_uses_summed_volume() {
        let markers = derive_markers(&[
            entry("Exactly100", 1.0, 1.0, &[40.0, 60.0]),
            entry("Exactly300", 2.0, 2.0, &[100.0, 200.0]),
            entry("Exactly500", 3.0, 3.0, &[250.0, 250.0]),
        ]);
        let bands: Vec<SeverityBand> = markers.iter().map(|m| m.band).collect();
        assert_eq!(bands, vec![SeverityBand::Moderate, SeverityBand::Low, SeverityBand::Adequate]);
    }

    #[test]
    fn test_unknown_location_excluded_from_markers_and_bounds() {
        let entries = vec![
            entry("North", 45.0, -100.0, &[10.0]),
            entry("Nowhere", 0.0, 0.0, &[10.0]),
            entry("South", 30.0, -80.0, &[10.0]),
        ];
        let markers = derive_markers(&entries);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.key.hospital != "Nowhere"));

        let bounds = BoundingBox::of_markers(&markers).unwrap();
        assert_eq!(bounds, BoundingBox { south: 30.0, west: -100.0, north: 45.0, east: -80.0 });
        assert_eq!(bounds.corners(), [[30.0, -100.0], [45.0, -80.0]]);
    }

    #[test]
    fn test_enclosing_skips_sentinel_positions() {
        let points = [Coordinates::new(0.0, 0.0), Coordinates::new(10.0, 20.0)];
        let bounds = BoundingBox::enclosing(points.iter()).unwrap();
        assert_eq!(bounds, BoundingBox { south: 10.0, west: 20.0, north: 10.0, east: 20.0 });
    }

    #[test]
    fn test_no_markers_no_bounds() {
        assert_eq!(BoundingBox::of_markers(&[]), None);
        let only_unknown = derive_markers(&[entry("Nowhere", 0.0, 0.0, &[])]);
        assert_eq!(BoundingBox::of_markers(&only_unknown), None);
    }

    #[test]
    fn test_match_lines_skip_unknown_endpoints() {
        let entries = vec![entry("Source", 40.0, -90.0, &[600.0]), entry("Hidden", 0.0, 0.0, &[600.0])];
        let markers = derive_markers(&entries);

        let mut matches = HashMap::new();
        matches.insert(
            HospitalKey::of(&entries[0]),
            vec![match_at("Near", 41.0, -91.0), match_at("Lost", 0.0, 0.0)],
        );
        matches.insert(HospitalKey::of(&entries[1]), vec![match_at("Other", 42.0, -92.0)]);

        let lines = match_lines(&markers, &matches);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].target, "Near");
        assert_eq!(lines[0].from, Coordinates::new(40.0, -90.0));
        assert_eq!(lines[0].to, Coordinates::new(41.0, -91.0));
    }

    #[test]
    fn test_missing_match_list_is_empty() {
        let markers = derive_markers(&[entry("Source", 40.0, -90.0, &[600.0])]);
        assert!(match_lines(&markers, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_popup_escapes_names() {
        let markers = derive_markers(&[entry("<b>Mercy</b> & Co", 1.0, 1.0, &[50.0])]);
        let html = markers[0].popup_html();
        assert!(html.contains("&lt;b&gt;Mercy&lt;/b&gt; &amp; Co"));
        assert!(html.contains("Critical"));
    }

    #[test]
    fn test_match_line_popup_escapes_names() {
        let line = MatchLine {
            from: Coordinates::new(1.0, 1.0),
            to: Coordinates::new(2.0, 2.0),
            source: HospitalKey { hospital: "<i>Mercy</i>".into(), city: "Reno".into() },
            target: "St. Luke's <script>".into(),
        };
        assert_eq!(line.popup_html(), "&lt;i&gt;Mercy&lt;/i&gt; → St. Luke's &lt;script&gt;");
    }
}

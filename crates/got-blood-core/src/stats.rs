//! Inventory Statistics
//!
//! Aggregates shown on the statistics page, computed from `/hospital/data`.

use std::collections::{BTreeMap, BTreeSet};

use crate::dto::HospitalInventoryRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct BloodTypeShare {
    pub blood_type: String,
    pub units: i64,
    /// Percentage of the positive total; 0 when the total is not positive
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryStats {
    pub record_count: usize,
    pub hospital_count: usize,
    pub total_units: i64,
    /// Sorted by blood type
    pub by_blood_type: Vec<BloodTypeShare>,
    /// Sorted by units descending, then city name
    pub by_city: Vec<(String, i64)>,
}

impl InventoryStats {
    pub fn from_records(records: &[HospitalInventoryRecord]) -> Self {
        let mut by_type: BTreeMap<&str, i64> = BTreeMap::new();
        let mut by_city: BTreeMap<&str, i64> = BTreeMap::new();
        let mut hospitals: BTreeSet<(&str, &str)> = BTreeSet::new();

        for record in records {
            *by_type.entry(record.blood_type.as_str()).or_default() += record.delta_count;
            *by_city.entry(record.city.as_str()).or_default() += record.delta_count;
            hospitals.insert((record.hospital.as_str(), record.city.as_str()));
        }

        let total_units: i64 = records.iter().map(|r| r.delta_count).sum();
        let positive_total: i64 = by_type.values().filter(|units| **units > 0).sum();

        let by_blood_type = by_type
            .into_iter()
            .map(|(blood_type, units)| BloodTypeShare {
                blood_type: blood_type.to_string(),
                units,
                percent: if positive_total > 0 && units > 0 {
                    units as f64 * 100.0 / positive_total as f64
                } else {
                    0.0
                },
            })
            .collect();

        let mut by_city: Vec<(String, i64)> = by_city
            .into_iter()
            .map(|(city, units)| (city.to_string(), units))
            .collect();
        by_city.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            record_count: records.len(),
            hospital_count: hospitals.len(),
            total_units,
            by_blood_type,
            by_city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hospital: &str, city: &str, blood_type: &str, delta: i64) -> HospitalInventoryRecord {
        HospitalInventoryRecord {
            hospital: hospital.into(),
            city: city.into(),
            blood_type: blood_type.into(),
            delta_count: delta,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(InventoryStats::from_records(&[]), InventoryStats::default());
    }

    #[test]
    fn test_aggregates() {
        let records = vec![
            record("Mercy", "Austin", "A+", 6),
            record("Mercy", "Austin", "O-", 2),
            record("General", "Dallas", "A+", 2),
            record("General", "Dallas", "B+", -4),
            record("Mercy", "Dallas", "O-", 10),
        ];
        let stats = InventoryStats::from_records(&records);

        assert_eq!(stats.record_count, 5);
        assert_eq!(stats.hospital_count, 3);
        assert_eq!(stats.total_units, 16);

        let types: Vec<(&str, i64)> = stats
            .by_blood_type
            .iter()
            .map(|s| (s.blood_type.as_str(), s.units))
            .collect();
        assert_eq!(types, vec![("A+", 8), ("B+", -4), ("O-", 12)]);

        // positive total is 20
        assert_eq!(stats.by_blood_type[0].percent, 40.0);
        assert_eq!(stats.by_blood_type[1].percent, 0.0);
        assert_eq!(stats.by_blood_type[2].percent, 60.0);

        assert_eq!(stats.by_city, vec![("Austin".to_string(), 8), ("Dallas".to_string(), 8)]);
    }

    #[test]
    fn test_city_order_by_units() {
        let records = vec![record("A", "Zed", "A+", 1), record("B", "Abe", "A+", 5)];
        let stats = InventoryStats::from_records(&records);
        assert_eq!(stats.by_city[0], ("Abe".to_string(), 5));
    }
}

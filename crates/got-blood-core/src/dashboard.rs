//! Dashboard Branching
//!
//! Picks which supplementary panels a hospital dashboard shows, from the
//! hospital's own inventory counts.

use crate::dto::{
    BloodInventory, DonorPool, ExcessHospital, HospitalInventorySnapshot, NeededHospital, Recommendations,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A count at or below this is low stock
    pub low_stock: i64,
    /// A count at or above this is surplus
    pub surplus: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low_stock: 2, surplus: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardMode {
    /// Low on this blood type: look for excess hospitals and donor pools
    Shortage { blood_type: String },
    /// Surplus of this blood type: look for hospitals in need
    Surplus { blood_type: String },
    Neutral,
}

/// Supplementary dashboard panel, each backed by one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    ExcessHospitals,
    DonorPools,
    NeededHospitals,
}

impl DashboardMode {
    /// Panels to fetch and show, in fetch order
    pub fn panels(&self) -> &'static [Panel] {
        match self {
            DashboardMode::Shortage { .. } => &[Panel::ExcessHospitals, Panel::DonorPools],
            DashboardMode::Surplus { .. } => &[Panel::NeededHospitals],
            DashboardMode::Neutral => &[],
        }
    }

    pub fn blood_type(&self) -> Option<&str> {
        match self {
            DashboardMode::Shortage { blood_type } | DashboardMode::Surplus { blood_type } => {
                Some(blood_type.as_str())
            }
            DashboardMode::Neutral => None,
        }
    }
}

/// Low stock is checked over every type before surplus is considered.
/// Within each check only the first qualifying type (server order) counts.
pub fn resolve_mode(inventory: &BloodInventory, thresholds: Thresholds) -> DashboardMode {
    if let Some((blood_type, _)) = inventory.iter().find(|(_, count)| *count <= thresholds.low_stock) {
        return DashboardMode::Shortage { blood_type: blood_type.to_string() };
    }
    if let Some((blood_type, _)) = inventory.iter().find(|(_, count)| *count >= thresholds.surplus) {
        return DashboardMode::Surplus { blood_type: blood_type.to_string() };
    }
    DashboardMode::Neutral
}

/// Everything one dashboard load produces
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub snapshot: Option<HospitalInventorySnapshot>,
    pub excess_hospitals: Option<Vec<ExcessHospital>>,
    pub donor_pools: Option<Vec<DonorPool>>,
    pub needed_hospitals: Option<Vec<NeededHospital>>,
    pub recommendations: Option<Recommendations>,
}

impl DashboardData {
    /// Keep only the panels that belong to `mode`
    pub fn retain_mode_panels(&mut self, mode: &DashboardMode) {
        let panels = mode.panels();
        if !panels.contains(&Panel::ExcessHospitals) {
            self.excess_hospitals = None;
        }
        if !panels.contains(&Panel::DonorPools) {
            self.donor_pools = None;
        }
        if !panels.contains(&Panel::NeededHospitals) {
            self.needed_hospitals = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(pairs: &[(&str, i64)]) -> BloodInventory {
        BloodInventory(pairs.iter().map(|(bt, n)| (bt.to_string(), *n)).collect())
    }

    #[test]
    fn test_low_stock_takes_priority_over_surplus() {
        let mode = resolve_mode(&inventory(&[("A+", 1), ("B+", 15)]), Thresholds::default());
        assert_eq!(mode, DashboardMode::Shortage { blood_type: "A+".to_string() });
    }

    #[test]
    fn test_low_stock_wins_even_when_surplus_listed_first() {
        let mode = resolve_mode(&inventory(&[("B+", 15), ("A+", 1)]), Thresholds::default());
        assert_eq!(mode, DashboardMode::Shortage { blood_type: "A+".to_string() });
    }

    #[test]
    fn test_surplus_when_nothing_low() {
        let mode = resolve_mode(&inventory(&[("A+", 5), ("B+", 15)]), Thresholds::default());
        assert_eq!(mode, DashboardMode::Surplus { blood_type: "B+".to_string() });
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let t = Thresholds::default();
        assert_eq!(resolve_mode(&inventory(&[("O-", 2)]), t), DashboardMode::Shortage { blood_type: "O-".into() });
        assert_eq!(resolve_mode(&inventory(&[("O-", 10)]), t), DashboardMode::Surplus { blood_type: "O-".into() });
        assert_eq!(resolve_mode(&inventory(&[("O-", 3), ("O+", 9)]), t), DashboardMode::Neutral);
    }

    #[test]
    fn test_first_qualifying_type_wins() {
        let mode = resolve_mode(&inventory(&[("AB-", 5), ("O+", 0), ("A-", 1)]), Thresholds::default());
        assert_eq!(mode.blood_type(), Some("O+"));

        let mode = resolve_mode(&inventory(&[("AB-", 12), ("O+", 30)]), Thresholds::default());
        assert_eq!(mode.blood_type(), Some("AB-"));
    }

    #[test]
    fn test_empty_inventory_is_neutral() {
        assert_eq!(resolve_mode(&BloodInventory::default(), Thresholds::default()), DashboardMode::Neutral);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = Thresholds { low_stock: 5, surplus: 50 };
        assert_eq!(resolve_mode(&inventory(&[("A+", 5), ("B+", 15)]), t).blood_type(), Some("A+"));
        assert_eq!(resolve_mode(&inventory(&[("A+", 6), ("B+", 15)]), t), DashboardMode::Neutral);
    }

    #[test]
    fn test_shortage_fetches_excess_and_donor_pools_only() {
        let mode = resolve_mode(&inventory(&[("A+", 1), ("B+", 15)]), Thresholds::default());
        assert_eq!(mode.panels(), &[Panel::ExcessHospitals, Panel::DonorPools]);
        assert!(!mode.panels().contains(&Panel::NeededHospitals));
    }

    #[test]
    fn test_surplus_fetches_needed_hospitals_only() {
        let mode = resolve_mode(&inventory(&[("A+", 5), ("B+", 15)]), Thresholds::default());
        assert_eq!(mode.panels(), &[Panel::NeededHospitals]);
    }

    #[test]
    fn test_neutral_fetches_no_panels() {
        let mode = resolve_mode(&inventory(&[("A+", 5), ("B+", 6)]), Thresholds::default());
        assert!(mode.panels().is_empty());
    }

    #[test]
    fn test_retain_mode_panels() {
        let full = DashboardData {
            snapshot: None,
            excess_hospitals: Some(vec![]),
            donor_pools: Some(vec![]),
            needed_hospitals: Some(vec![]),
            recommendations: Some(Recommendations::default()),
        };

        let mut shortage = full.clone();
        shortage.retain_mode_panels(&DashboardMode::Shortage { blood_type: "A+".into() });
        assert!(shortage.excess_hospitals.is_some() && shortage.donor_pools.is_some());
        assert!(shortage.needed_hospitals.is_none());

        let mut surplus = full.clone();
        surplus.retain_mode_panels(&DashboardMode::Surplus { blood_type: "A+".into() });
        assert!(surplus.excess_hospitals.is_none() && surplus.donor_pools.is_none());
        assert!(surplus.needed_hospitals.is_some());

        let mut neutral = full;
        neutral.retain_mode_panels(&DashboardMode::Neutral);
        assert!(neutral.excess_hospitals.is_none());
        assert!(neutral.donor_pools.is_none());
        assert!(neutral.needed_hospitals.is_none());
        assert!(neutral.recommendations.is_some());
    }
}

//! Hospital Name Filter
//!
//! Live search used by the inventory table.

use crate::dto::HospitalInventoryRecord;
use crate::fetch::Loadable;

/// Records whose hospital name contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn filter_by_hospital<'a>(
    records: &'a [HospitalInventoryRecord],
    query: &str,
) -> Vec<&'a HospitalInventoryRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.hospital.to_lowercase().contains(&needle))
        .collect()
}

/// Rows of the table, or `None` while loading or after a failed fetch
/// (the table body stays empty then)
pub fn table_rows<'a>(
    state: &'a Loadable<Vec<HospitalInventoryRecord>>,
    query: &str,
) -> Option<Vec<&'a HospitalInventoryRecord>> {
    state.is_ready().then(|| filter_by_hospital(&state.data, query))
}

/// Text of the placeholder row shown when nothing matches
pub fn no_match_message(query: &str) -> String {
    format!("No hospitals found matching \"{}\"", query)
}

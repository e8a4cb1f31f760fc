//! Presentation tier of a record, derived from how much of it is populated.

use crate::core::record::ClubRecord;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTier {
    Basic,
    Core,
    Rich,
}

impl DataTier {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataTier::Basic => "basic",
            DataTier::Core => "core",
            DataTier::Rich => "rich",
        }
    }
}

impl Display for DataTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a record as `Rich` when at least two of revenue, total assets,
/// operating expenses, net income and total equity are reported, `Core` when
/// revenue or total assets is, and `Basic` otherwise.
pub fn classify(record: &ClubRecord) -> DataTier {
    let rich_fields = [
        record.revenue,
        record.total_assets,
        record.operating_expenses,
        record.net_income,
        record.total_equity,
    ];
    let core_fields = [record.revenue, record.total_assets];

    if count_present(&rich_fields) >= 2 {
        DataTier::Rich
    } else if count_present(&core_fields) >= 1 {
        DataTier::Core
    } else {
        DataTier::Basic
    }
}

fn count_present(fields: &[Option<f64>]) -> usize {
    fields.iter().filter(|field| field.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_rich_fields_is_rich() {
        let record = ClubRecord {
            revenue: Some(100.0),
            total_assets: Some(50.0),
            net_income: Some(10.0),
            ..Default::default()
        };
        assert_eq!(classify(&record), DataTier::Rich);
    }

    #[test]
    fn test_revenue_only_is_core() {
        let record = ClubRecord {
            revenue: Some(100.0),
            ..Default::default()
        };
        assert_eq!(classify(&record), DataTier::Core);
    }

    #[test]
    fn test_empty_record_is_basic() {
        assert_eq!(classify(&ClubRecord::default()), DataTier::Basic);
    }

    #[test]
    fn test_zero_values_count_as_present() {
        let record = ClubRecord {
            operating_expenses: Some(0.0),
            total_equity: Some(0.0),
            ..Default::default()
        };
        assert_eq!(classify(&record), DataTier::Rich);

        let record = ClubRecord {
            total_assets: Some(0.0),
            ..Default::default()
        };
        assert_eq!(classify(&record), DataTier::Core);
    }

    #[test]
    fn test_single_non_core_rich_field_is_basic() {
        let record = ClubRecord {
            net_income: Some(-20.0),
            player_wages: Some(500.0),
            ..Default::default()
        };
        assert_eq!(classify(&record), DataTier::Basic);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(DataTier::Rich.to_string(), "rich");
        assert_eq!(DataTier::Core.to_string(), "core");
        assert_eq!(DataTier::Basic.to_string(), "basic");
    }

    #[test]
    fn test_display_matches_serialized_name() {
        for tier in [DataTier::Basic, DataTier::Core, DataTier::Rich] {
            let serialized = serde_json::to_string(&tier).unwrap();
            assert_eq!(serialized, format!("\"{tier}\""));
        }
    }
}

//! Club financial record as served by the records API.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One club's filed accounts. Every figure is independently optional:
/// `None` means the filing did not report it, `Some(0.0)` means it reported zero.
///
/// Liability and creditor figures follow the filing convention of being
/// stored as negative amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubRecord {
    pub club_name: String,
    pub company_number: Option<String>,
    pub legal_name: Option<String>,
    pub accounts_year_end: Option<String>,
    pub filing_date: Option<String>,
    pub filing_year: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,

    #[serde(deserialize_with = "lenient_amount")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub broadcasting_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub commercial_revenue: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub matchday_revenue: Option<f64>,

    #[serde(deserialize_with = "lenient_amount")]
    pub operating_profit: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub profit_loss_before_tax: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub net_income: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub operating_expenses: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub administrative_expenses: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub player_wages: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub staff_costs_total: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub profit_on_player_disposals: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub player_amortization: Option<f64>,

    #[serde(deserialize_with = "lenient_amount")]
    pub total_assets: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_liabilities: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_equity: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub net_assets: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub current_assets: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub creditors_due_within_one_year: Option<f64>,

    #[serde(deserialize_with = "lenient_amount")]
    pub operating_cash_flow: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub investing_cash_flow: Option<f64>,
    #[serde(deserialize_with = "lenient_amount")]
    pub financing_cash_flow: Option<f64>,
}

impl ClubRecord {
    /// True when at least one revenue category is reported.
    pub fn has_revenue_breakdown(&self) -> bool {
        self.broadcasting_revenue.is_some()
            || self.commercial_revenue.is_some()
            || self.matchday_revenue.is_some()
    }

    /// Accounting reference date, if it is in a recognised format.
    pub fn year_end(&self) -> Option<NaiveDate> {
        let raw = self.accounts_year_end.as_deref()?.trim();
        ["%Y-%m-%d", "%d/%m/%Y", "%d %B %Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                // Timestamps such as 2024-05-31T00:00:00Z
                raw.get(..10)
                    .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            })
    }
}

/// Payload of the collection endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubsResponse {
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub clubs: Vec<ClubRecord>,
}

/// Payload of the detail endpoint. Zero or one matching record is expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsResponse {
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub found: Option<usize>,
    #[serde(default)]
    pub documents: Vec<ClubRecord>,
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(amount_from_value))
}

fn amount_from_value(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount(s),
        _ => None,
    };
    amount.filter(|a| a.is_finite())
}

/// Parses figures such as `"1,234"`, `"£5,000"` or `"(2,500)"` (negative).
fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '£' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let amount: f64 = cleaned.parse().ok()?;
    Some(if negative { -amount } else { amount })
}

//! Derived financial metrics computed from a single club record.
//!
//! Filings are often incomplete, so every metric is optional: it is produced
//! only when all of its inputs are reported and any divisor is non-zero.
//! Missing inputs are never treated as zero, and cost-based ratios also skip
//! a zero cost. Cost and liability figures are
//! used by magnitude since filings report them with mixed signs.

use crate::core::record::ClubRecord;
use serde::Serialize;
use std::fmt::Display;

/// One revenue category: the reported amount and its share of total revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueShare {
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueBreakdown {
    pub broadcasting: RevenueShare,
    pub commercial: RevenueShare,
    pub matchday: RevenueShare,
    /// Revenue not attributed to a category. Negative when the categories
    /// add up to more than the reported total.
    pub other: RevenueShare,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OperatingRatios {
    pub operating_margin: Option<f64>,
    pub wages_percentage: Option<f64>,
    pub admin_percentage: Option<f64>,
    pub total_operating_costs: Option<f64>,
    pub player_investment_efficiency: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSheetRatios {
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub current_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub equity_ratio: Option<f64>,
    pub debt_ratio: Option<f64>,
    pub net_current_assets: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowSummary {
    pub operating: Option<f64>,
    pub investing: Option<f64>,
    pub financing: Option<f64>,
    /// Sum of the reported components.
    pub net_cash_flow: f64,
}

/// Splits revenue into broadcasting, commercial, matchday and the remainder.
///
/// Absent categories count as zero here. Percentages are only computed when
/// total revenue is positive; otherwise they are all zero. Callers should
/// check [`ClubRecord::has_revenue_breakdown`] first.
pub fn compute_revenue_breakdown(record: &ClubRecord) -> RevenueBreakdown {
    let total = record.revenue.unwrap_or(0.0);
    let share = |amount: f64| RevenueShare {
        amount,
        percentage: if total > 0.0 {
            amount / total * 100.0
        } else {
            0.0
        },
    };

    let broadcasting = record.broadcasting_revenue.unwrap_or(0.0);
    let commercial = record.commercial_revenue.unwrap_or(0.0);
    let matchday = record.matchday_revenue.unwrap_or(0.0);

    RevenueBreakdown {
        broadcasting: share(broadcasting),
        commercial: share(commercial),
        matchday: share(matchday),
        other: share(total - (broadcasting + commercial + matchday)),
    }
}

/// Profit and cost ratios relative to revenue.
pub fn compute_ratios(record: &ClubRecord) -> OperatingRatios {
    let wages = record.player_wages.map(f64::abs);
    let admin = record.administrative_expenses.map(f64::abs);
    let staff = record.staff_costs_total.map(f64::abs);

    let total_operating_costs = if admin.is_some() || wages.is_some() || staff.is_some() {
        let labor = match wages {
            Some(w) if w > 0.0 => w,
            _ => staff.unwrap_or(0.0),
        };
        Some(admin.unwrap_or(0.0) + labor)
    } else {
        None
    };

    OperatingRatios {
        operating_margin: percentage(record.operating_profit, record.revenue),
        wages_percentage: percentage(non_zero(wages), record.revenue),
        admin_percentage: percentage(non_zero(admin), record.revenue),
        total_operating_costs,
        player_investment_efficiency: ratio(
            non_zero(record.profit_on_player_disposals),
            record.player_amortization.map(f64::abs),
        ),
    }
}

/// Return, liquidity and leverage ratios from the balance sheet.
///
/// Returns use net income when reported, falling back to profit before tax.
pub fn compute_balance_sheet_ratios(record: &ClubRecord) -> BalanceSheetRatios {
    let profit = record.net_income.or(record.profit_loss_before_tax);
    let liabilities = record.total_liabilities.map(f64::abs);
    let short_term_creditors = record.creditors_due_within_one_year.map(f64::abs);

    BalanceSheetRatios {
        return_on_equity: percentage(profit, record.total_equity),
        return_on_assets: percentage(profit, record.total_assets),
        current_ratio: ratio(record.current_assets, short_term_creditors),
        debt_to_equity: ratio(liabilities, record.total_equity),
        equity_ratio: percentage(record.total_equity, record.total_assets),
        debt_ratio: percentage(liabilities, record.total_assets),
        net_current_assets: record
            .current_assets
            .zip(short_term_creditors)
            .map(|(assets, creditors)| assets - creditors),
    }
}

/// `None` when no cash flow component is reported.
pub fn compute_cash_flow_summary(record: &ClubRecord) -> Option<CashFlowSummary> {
    let components = [
        record.operating_cash_flow,
        record.investing_cash_flow,
        record.financing_cash_flow,
    ];
    if components.iter().all(Option::is_none) {
        return None;
    }

    Some(CashFlowSummary {
        operating: record.operating_cash_flow,
        investing: record.investing_cash_flow,
        financing: record.financing_cash_flow,
        net_cash_flow: components.iter().flatten().sum(),
    })
}

/// Treats a zero figure as unreported.
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let numerator = numerator?;
    let denominator = denominator.filter(|d| *d != 0.0)?;
    Some(numerator / denominator).filter(|r| r.is_finite())
}

fn percentage(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    ratio(numerator, denominator).map(|r| r * 100.0)
}

/// Qualitative reading of a ratio value, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Strong,
    Moderate,
    Weak,
}

impl Band {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Strong => "strong",
            Band::Moderate => "moderate",
            Band::Weak => "weak",
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    OperatingMargin,
    ReturnOnEquity,
    ReturnOnAssets,
    CurrentRatio,
    DebtToEquity,
    EquityRatio,
    DebtRatio,
}

impl RatioKind {
    pub fn label(&self) -> &'static str {
        match self {
            RatioKind::OperatingMargin => "Operating margin",
            RatioKind::ReturnOnEquity => "Return on equity",
            RatioKind::ReturnOnAssets => "Return on assets",
            RatioKind::CurrentRatio => "Current ratio",
            RatioKind::DebtToEquity => "Debt to equity",
            RatioKind::EquityRatio => "Equity to assets",
            RatioKind::DebtRatio => "Debt to assets",
        }
    }

    /// True when the ratio is a percentage rather than a plain multiple.
    pub fn is_percentage(&self) -> bool {
        !matches!(self, RatioKind::CurrentRatio | RatioKind::DebtToEquity)
    }

    pub fn band(&self, value: f64) -> Band {
        // (strong, moderate) thresholds; leverage ratios are better when lower.
        let (strong, moderate, higher_is_better) = match self {
            RatioKind::OperatingMargin => (10.0, 0.0, true),
            RatioKind::ReturnOnEquity => (15.0, 5.0, true),
            RatioKind::ReturnOnAssets => (5.0, 1.0, true),
            RatioKind::CurrentRatio => (1.5, 1.0, true),
            RatioKind::DebtToEquity => (0.5, 1.0, false),
            RatioKind::EquityRatio => (50.0, 30.0, true),
            RatioKind::DebtRatio => (40.0, 60.0, false),
        };

        let beats = |threshold: f64| {
            if higher_is_better {
                value > threshold
            } else {
                value < threshold
            }
        };

        if beats(strong) {
            Band::Strong
        } else if beats(moderate) {
            Band::Moderate
        } else {
            Band::Weak
        }
    }
}

impl BalanceSheetRatios {
    /// The banded ratios that were computable, in display order.
    pub fn banded(&self) -> Vec<(RatioKind, f64)> {
        [
            (RatioKind::ReturnOnEquity, self.return_on_equity),
            (RatioKind::ReturnOnAssets, self.return_on_assets),
            (RatioKind::CurrentRatio, self.current_ratio),
            (RatioKind::DebtToEquity, self.debt_to_equity),
            (RatioKind::EquityRatio, self.equity_ratio),
            (RatioKind::DebtRatio, self.debt_ratio),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| (kind, v)))
        .collect()
    }
}

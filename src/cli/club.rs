use super::ui;
use crate::core::metrics::{RatioKind, RevenueShare};
use crate::facade::{ClubDetail, DataAccessFacade};
use anyhow::{Result, bail};
use comfy_table::Cell;

impl ClubDetail {
    pub fn display(&self) -> String {
        let record = &self.record;
        let mut output = format!(
            "Club: {}\n",
            ui::style_text(&record.club_name, ui::StyleType::Title)
        );

        if let Some(legal_name) = &record.legal_name {
            output.push_str(&format!("Legal name: {legal_name}\n"));
        }
        if let Some(company_number) = &record.company_number {
            output.push_str(&format!("Company number: {company_number}\n"));
        }
        if let Some(year_end) = &record.accounts_year_end {
            output.push_str(&format!("Accounts year end: {year_end}\n"));
        }
        output.push_str(&format!(
            "Data tier: {}\n",
            ui::style_text(&self.tier.to_string(), ui::StyleType::Label)
        ));

        if let Some(description) = &self.description {
            output.push_str(&format!(
                "\n{}\n",
                ui::style_text(description, ui::StyleType::Subtle)
            ));
        }

        if let Some(ratios) = &self.metrics.ratios {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Metric"),
                ui::header_cell("Value"),
                ui::header_cell("Reading"),
            ]);
            table.add_row(vec![
                Cell::new("Revenue"),
                ui::format_optional_cell(record.revenue, ui::format_amount),
                Cell::new(""),
            ]);
            table.add_row(vec![
                Cell::new(RatioKind::OperatingMargin.label()),
                ui::format_optional_cell(ratios.operating_margin, ui::format_percentage),
                ratios
                    .operating_margin
                    .map_or(Cell::new(""), |m| {
                        ui::band_cell(RatioKind::OperatingMargin.band(m))
                    }),
            ]);
            table.add_row(vec![
                Cell::new("Wages / revenue"),
                ui::format_optional_cell(ratios.wages_percentage, ui::format_percentage),
                Cell::new(""),
            ]);
            table.add_row(vec![
                Cell::new("Admin / revenue"),
                ui::format_optional_cell(ratios.admin_percentage, ui::format_percentage),
                Cell::new(""),
            ]);
            table.add_row(vec![
                Cell::new("Total operating costs"),
                ui::format_optional_cell(ratios.total_operating_costs, ui::format_amount),
                Cell::new(""),
            ]);
            table.add_row(vec![
                Cell::new("Player trading efficiency"),
                ui::format_optional_cell(ratios.player_investment_efficiency, |v| {
                    format!("{v:.2}x")
                }),
                Cell::new(""),
            ]);
            output.push_str(&format!(
                "\n{}\n{}\n",
                ui::style_text("Performance", ui::StyleType::Label),
                table
            ));
        }

        if let Some(breakdown) = &self.metrics.revenue_breakdown {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Source"),
                ui::header_cell("Amount"),
                ui::header_cell("Share"),
            ]);
            let rows: [(&str, &RevenueShare); 4] = [
                ("Broadcasting", &breakdown.broadcasting),
                ("Commercial", &breakdown.commercial),
                ("Matchday", &breakdown.matchday),
                ("Other", &breakdown.other),
            ];
            for (label, share) in rows {
                table.add_row(vec![
                    Cell::new(label),
                    ui::format_optional_cell(Some(share.amount), ui::format_amount),
                    ui::format_optional_cell(Some(share.percentage), ui::format_percentage),
                ]);
            }
            output.push_str(&format!(
                "\n{}\n{}\n",
                ui::style_text("Revenue breakdown", ui::StyleType::Label),
                table
            ));
        }

        if let Some(balance) = &self.metrics.balance_sheet {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Ratio"),
                ui::header_cell("Value"),
                ui::header_cell("Reading"),
            ]);
            for (kind, value) in balance.banded() {
                let formatted = if kind.is_percentage() {
                    ui::format_percentage(value)
                } else {
                    format!("{value:.2}")
                };
                table.add_row(vec![
                    Cell::new(kind.label()),
                    ui::format_optional_cell(Some(formatted), |v| v),
                    ui::band_cell(kind.band(value)),
                ]);
            }
            table.add_row(vec![
                Cell::new("Net current assets"),
                ui::format_optional_cell(balance.net_current_assets, ui::format_amount),
                Cell::new(""),
            ]);
            output.push_str(&format!(
                "\n{}\n{}\n",
                ui::style_text("Financial position", ui::StyleType::Label),
                table
            ));
        }

        if let Some(cash_flow) = &self.metrics.cash_flow {
            let mut table = ui::new_styled_table();
            table.set_header(vec![ui::header_cell("Cash flow"), ui::header_cell("Amount")]);
            for (label, value) in [
                ("Operating", cash_flow.operating),
                ("Investing", cash_flow.investing),
                ("Financing", cash_flow.financing),
                ("Net", Some(cash_flow.net_cash_flow)),
            ] {
                table.add_row(vec![
                    Cell::new(label),
                    ui::format_optional_cell(value, ui::format_amount),
                ]);
            }
            output.push_str(&format!("\n{table}\n"));
        }

        output
    }
}

pub async fn run(facade: &DataAccessFacade, club_name: &str) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching {club_name}..."));
    let detail = facade.club_detail(club_name).await;
    pb.finish_and_clear();

    match detail? {
        Some(detail) => {
            println!("{}", detail.display());
            Ok(())
        }
        None => bail!("No financial records found for {club_name}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{ClubRecord, classify};
    use crate::facade::{ClubDetail, derive_metrics};

    fn detail_for(record: ClubRecord, description: Option<&str>) -> ClubDetail {
        let tier = classify(&record);
        ClubDetail {
            metrics: derive_metrics(&record, tier),
            record,
            tier,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_rich_detail_display() {
        let record = ClubRecord {
            club_name: "Aldershot Town".to_string(),
            company_number: Some("02123456".to_string()),
            revenue: Some(1000.0),
            operating_profit: Some(-50.0),
            broadcasting_revenue: Some(600.0),
            total_assets: Some(500.0),
            total_equity: Some(250.0),
            net_income: Some(50.0),
            investing_cash_flow: Some(-10.0),
            ..Default::default()
        };

        let output = detail_for(record, Some("The Shots")).display();

        assert!(output.contains("Aldershot Town"));
        assert!(output.contains("02123456"));
        assert!(output.contains("rich"));
        assert!(output.contains("The Shots"));
        assert!(output.contains("-5.0%"));
        assert!(output.contains("Broadcasting"));
        assert!(output.contains("60.0%"));
        assert!(output.contains("Return on equity"));
        assert!(output.contains("20.0%"));
        assert!(output.contains("strong"));
        assert!(output.contains("Investing"));
    }

    #[test]
    fn test_basic_detail_display_has_no_metric_tables() {
        let record = ClubRecord {
            club_name: "Barnet".to_string(),
            ..Default::default()
        };

        let output = detail_for(record, None).display();

        assert!(output.contains("Barnet"));
        assert!(output.contains("basic"));
        assert!(!output.contains("Performance"));
        assert!(!output.contains("Revenue breakdown"));
    }
}

use super::ui;
use crate::core::{ClubRecord, classify};
use crate::facade::DataAccessFacade;
use anyhow::Result;
use comfy_table::Cell;

/// Renders one row per club with its identity, tier and headline revenue.
pub fn display_clubs(clubs: &[ClubRecord]) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Club"),
        ui::header_cell("Company No."),
        ui::header_cell("Year End"),
        ui::header_cell("Tier"),
        ui::header_cell("Revenue"),
    ]);

    for club in clubs {
        let year_end = club
            .year_end()
            .map(|d| d.format("%d %b %Y").to_string())
            .or_else(|| club.accounts_year_end.clone())
            .unwrap_or_else(|| "N/A".to_string());

        table.add_row(vec![
            Cell::new(&club.club_name),
            Cell::new(club.company_number.as_deref().unwrap_or("N/A")),
            Cell::new(year_end),
            Cell::new(classify(club).to_string()),
            ui::format_optional_cell(club.revenue, ui::format_amount),
        ]);
    }

    let mut output = format!(
        "{} ({})\n\n",
        ui::style_text("Clubs", ui::StyleType::Title),
        clubs.len()
    );
    output.push_str(&table.to_string());
    output
}

pub async fn run(facade: &DataAccessFacade) -> Result<()> {
    let pb = ui::new_spinner("Fetching clubs...");
    let clubs = facade.all_clubs().await;
    pb.finish_and_clear();

    println!("{}", display_clubs(&clubs?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_clubs() {
        let clubs = vec![
            ClubRecord {
                club_name: "Aldershot Town".to_string(),
                company_number: Some("02123456".to_string()),
                accounts_year_end: Some("2024-05-31".to_string()),
                revenue: Some(3_500_000.0),
                ..Default::default()
            },
            ClubRecord {
                club_name: "Barnet".to_string(),
                ..Default::default()
            },
        ];

        let output = display_clubs(&clubs);

        assert!(output.contains("(2)"));
        assert!(output.contains("Aldershot Town"));
        assert!(output.contains("02123456"));
        assert!(output.contains("31 May 2024"));
        assert!(output.contains("3500000"));
        assert!(output.contains("core"));
        assert!(output.contains("basic"));
    }
}

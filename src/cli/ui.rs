use crate::core::metrics::Band;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Colours a band label green, yellow or red.
pub fn band_cell(band: Band) -> Cell {
    let color = match band {
        Band::Strong => Color::Green,
        Band::Moderate => Color::Yellow,
        Band::Weak => Color::Red,
    };
    Cell::new(band.to_string()).fg(color)
}

/// Whole-unit amount, signed.
pub fn format_amount(value: f64) -> String {
    format!("{value:.0}")
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Spinner shown while waiting on the network.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_and_percentage_formatting() {
        assert_eq!(format_amount(1_234_567.4), "1234567");
        assert_eq!(format_amount(-45_000.0), "-45000");
        assert_eq!(format_percentage(12.345), "12.3%");
    }

    #[test]
    fn test_optional_cell_renders_na() {
        let mut table = new_styled_table();
        table.add_row(vec![
            format_optional_cell(None::<f64>, format_amount),
            format_optional_cell(Some(2.5), format_percentage),
        ]);
        let rendered = table.to_string();
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("2.5%"));
    }
}

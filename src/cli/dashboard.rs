use anyhow::Result;
use comfy_table::Cell;

use super::{App, ui};
use crate::core::analytics::{duty_rate_by_country, summarize};

pub fn run(app: &App) -> Result<()> {
    let catalog = &app.catalog;
    let summary = summarize(catalog);

    println!(
        "{}\n",
        ui::style_text("Export Compliance Dashboard", ui::StyleType::Title)
    );

    let mut metrics = ui::new_styled_table();
    metrics.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    metrics.add_row(vec![
        Cell::new("Total Products"),
        Cell::new(summary.total_products),
    ]);
    metrics.add_row(vec![
        Cell::new("Countries Served"),
        Cell::new(summary.countries_served),
    ]);
    metrics.add_row(vec![
        Cell::new("Avg Duty Rate"),
        Cell::new(format!("{:.1}%", summary.avg_duty_rate)),
    ]);
    metrics.add_row(vec![
        Cell::new("Compliance Score"),
        Cell::new(format!("{:.0}%", summary.compliance_score)),
    ]);
    println!("{metrics}");

    let rates = duty_rate_by_country(catalog);
    if !rates.is_empty() {
        println!(
            "\n{}",
            ui::style_text("Duty Rates by Destination", ui::StyleType::Label)
        );
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Country"), ui::header_cell("Duty")]);
        for (country, rate) in rates {
            table.add_row(vec![Cell::new(country), ui::percent_cell(rate)]);
        }
        println!("{table}");
    }

    let documents = catalog.documents().len();
    let pending = catalog.products().len().saturating_sub(documents);
    println!(
        "\n{} {} compliant, {} pending documentation",
        ui::style_text("Documents:", ui::StyleType::Label),
        documents,
        pending
    );

    Ok(())
}

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sf_core::BudgetReport;

use super::load_store;

pub fn report(file: &Path) -> Result<(), String> {
    let store = load_store(file);
    let report = BudgetReport::audit(&store);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Total SPU", "Spent", "Available"]);
    table.add_row(vec![
        report.total_energy.to_string(),
        report.spent.to_string(),
        report.available.to_string(),
    ]);

    println!("{table}");
    println!();
    if report.overdrawn() {
        println!(
            "  {} the budget is overdrawn by {} SPU",
            "warning:".red().bold(),
            -report.available
        );
    } else {
        println!("  {} SPU {}", report.available, "available".green());
    }
    Ok(())
}

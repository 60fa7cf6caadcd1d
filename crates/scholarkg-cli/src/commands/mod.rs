//! CLI command implementations.

pub mod abox;
pub mod check;
pub mod generate;
pub mod tbox;

use std::path::Path;

use colored::Colorize;
use scholarkg::RunReport;

/// Print the statement counts and anomaly summary of a run.
pub fn print_report(report: &RunReport, verbose: bool) {
    println!("{}", "Nodes:".yellow().bold());
    for (class, count) in &report.nodes {
        println!("  {:<16} {}", class, count.to_string().white());
    }
    println!();

    println!("{}", "Edges:".yellow().bold());
    for (predicate, count) in &report.edges {
        println!("  {:<24} {}", predicate, count.to_string().white());
    }
    println!();

    println!(
        "Statements: {} ({} node, {} edge)",
        report.abox_statements.to_string().green().bold(),
        report.node_statements,
        report.edge_statements()
    );

    if report.anomalies.is_empty() {
        println!("Anomalies:  {}", "none".green());
        return;
    }

    println!(
        "Anomalies:  {} ({} rows dropped)",
        report.anomalies.len().to_string().yellow().bold(),
        report.dropped_rows()
    );
    for (kind, count) in report.anomalies_by_kind() {
        println!("  {:<16} {}", kind.label(), count.to_string().yellow());
    }

    if verbose {
        println!();
        for a in &report.anomalies {
            println!(
                "  {} {}[{}].{}: {}",
                "•".yellow(),
                a.table,
                a.row,
                a.column,
                a.message.dimmed()
            );
        }
    }
}

/// Save the report if a path was requested.
pub fn save_report(report: &RunReport, path: Option<&Path>) -> scholarkg::Result<()> {
    if let Some(path) = path {
        report.save(path)?;
        println!("{} {}", "Report saved to".dimmed(), path.display());
    }
    Ok(())
}

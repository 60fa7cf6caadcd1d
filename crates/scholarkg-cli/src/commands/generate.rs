//! Generate command - write both the schema and the instance graph.

use std::path::PathBuf;

use colored::Colorize;
use scholarkg::Generator;

use super::{print_report, save_report};
use crate::cli::RunArgs;

pub fn run(
    args: RunArgs,
    report_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve()?;
    let generator = Generator::with_config(config);

    println!(
        "{} {}",
        "Generating knowledge graph from".cyan().bold(),
        generator.config().data_dir.display().to_string().white()
    );
    println!();

    let report = generator.generate()?;
    print_report(&report, verbose);
    println!();

    println!(
        "{} {} ({} statements)",
        "TBOX written to".green(),
        generator.config().tbox_path().display(),
        report.tbox_statements.unwrap_or_default()
    );
    println!(
        "{} {} ({} statements)",
        "ABOX written to".green(),
        generator.config().abox_path().display(),
        report.abox_statements
    );

    save_report(&report, report_path.as_deref())?;
    Ok(())
}

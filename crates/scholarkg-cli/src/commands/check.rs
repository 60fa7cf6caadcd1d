//! Check command - run every phase and report, writing nothing.

use colored::Colorize;
use scholarkg::Generator;

use super::print_report;
use crate::cli::RunArgs;

pub fn run(args: RunArgs, json_output: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let generator = Generator::with_config(args.resolve()?);
    let report = generator.check()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Checked".cyan().bold(),
        generator.config().data_dir.display().to_string().white()
    );
    println!(
        "Sources: {} files, {} rows",
        report.sources.len(),
        report.sources.iter().map(|s| s.row_count).sum::<usize>()
    );
    println!();
    print_report(&report, verbose);

    Ok(())
}

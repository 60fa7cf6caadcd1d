//! Abox command - write the instance graph only.

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
    let generator = Generator::with_config(args.resolve()?);
    let report = generator.generate_abox()?;

    print_report(&report, verbose);
    println!();
    println!(
        "{} {}",
        "ABOX written to".green(),
        generator.config().abox_path().display()
    );

    save_report(&report, report_path.as_deref())?;
    Ok(())
}

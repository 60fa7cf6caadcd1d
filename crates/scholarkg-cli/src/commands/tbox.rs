//! Tbox command - write the schema graph only.

use colored::Colorize;
use scholarkg::Generator;

use crate::cli::RunArgs;

pub fn run(args: RunArgs, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let generator = Generator::with_config(args.resolve()?);
    let statements = generator.generate_tbox()?;

    println!(
        "{} {} ({} statements)",
        "TBOX written to".green(),
        generator.config().tbox_path().display(),
        statements
    );
    Ok(())
}

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use scholarkg::{GeneratorConfig, GraphFormat};

/// scholarkg: bibliographic knowledge-graph generator
#[derive(Parser)]
#[command(name = "scholarkg")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the schema graph (TBOX) and the instance graph (ABOX)
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Save the run report as JSON to this path
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Generate the schema graph only
    Tbox {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Generate the instance graph only
    Abox {
        #[command(flatten)]
        run: RunArgs,

        /// Save the run report as JSON to this path
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Load and assert everything without writing any graph
    Check {
        #[command(flatten)]
        run: RunArgs,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every command. Flags override the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding nodes/ and edges/
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory the graphs are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base namespace URL for every IRI
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Output format (turtle or ntriples)
    #[arg(short, long)]
    pub format: Option<GraphFormat>,
}

impl RunArgs {
    /// Resolve the generator configuration: defaults, then the config
    /// file, then flags.
    pub fn resolve(&self) -> scholarkg::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }

        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

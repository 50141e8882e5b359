use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gmx-compiler",
    about = "GMX project compiler: flattens game project descriptions and generates GML event scripts",
    version = "0.1.0"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a project description and print resource statistics
    Parse {
        /// Input project JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Report dangling symbolic references without failing the build
    Check {
        /// Input project JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Compile every object event and timeline moment to GML
    Codegen {
        /// Input project JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Write one .gml file per event into this directory instead of stdout
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Flatten the project and hand it to a build backend
    Build {
        /// Input project JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target path passed to the backend
        #[arg(short, long, default_value = "./build")]
        output: PathBuf,

        /// Build mode: run, debug, design, compile or rebuild
        #[arg(short, long, default_value = "compile")]
        mode: String,

        /// Backend to hand the flattened graph to
        #[arg(long, default_value = "script-dump")]
        backend: String,
    },
}

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// CLI arguments for the qxdts binary.
#[derive(Parser, Debug)]
#[command(
    name = "qxdts",
    version,
    about = "Generate a TypeScript declaration file from qooxdoo class metadata"
)]
pub struct CliArgs {
    /// Meta-database directory (holds db.json and one JSON record per class).
    #[arg(value_name = "META_DIR")]
    pub meta_dir: PathBuf,

    /// Path of the generated declaration file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file. Defaults to qxdts.json in the current directory.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// File whose contents replace the built-in preamble.
    #[arg(long = "base-declaration", value_name = "FILE")]
    pub base_declaration: Option<PathBuf>,

    /// Print the class names found in the meta-database and exit.
    #[arg(long = "list-classes")]
    pub list_classes: bool,

    /// Start from an empty type vocabulary instead of the built-in one.
    #[arg(long = "no-default-mappings")]
    pub no_default_mappings: bool,

    /// Start from an empty ignore list instead of the built-in one.
    #[arg(long = "no-default-ignores")]
    pub no_default_ignores: bool,

    /// Log progress to stderr (-v debug, -vv trace). QXDTS_LOG takes precedence.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;

use qxdts_cli::args::CliArgs;
use qxdts_cli::driver;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    // Installed only when QXDTS_LOG, RUST_LOG or -v asks for it.
    qxdts_cli::tracing_config::init_tracing(args.verbose);

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    if args.list_classes {
        for name in driver::list_classes(&args, &cwd)? {
            println!("{name}");
        }
        return Ok(());
    }

    let summary = driver::generate(&args, &cwd)?;
    eprintln!(
        "Generated {} ({} classes, {} skipped)",
        summary.output.display(),
        summary.stats.classes,
        summary.stats.skipped
    );
    Ok(())
}

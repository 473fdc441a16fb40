use anyhow::{Context, Result};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use qxdts_emitter::{DeclarationWriter, EmitStats, WriterConfig};
use qxdts_meta::{MetaDatabase, MetaIndex};

use crate::args::CliArgs;
use crate::config::{QxdtsConfig, find_config, load_config, resolve_writer_config};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Where the declarations were written.
    pub output: PathBuf,
    pub stats: EmitStats,
}

pub fn load_database(args: &CliArgs, cwd: &Path) -> Result<MetaDatabase> {
    let meta_dir = cwd.join(&args.meta_dir);
    MetaDatabase::load(&meta_dir)
        .with_context(|| format!("failed to load meta-database from {}", meta_dir.display()))
}

/// Sorted class names of the meta-database, as they would be emitted.
pub fn list_classes(args: &CliArgs, cwd: &Path) -> Result<Vec<String>> {
    let db = load_database(args, cwd)?;
    let mut names = db.class_names();
    names.sort();
    Ok(names)
}

pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<WriterConfig> {
    let file: Option<QxdtsConfig> = match find_config(args.config.as_deref(), cwd) {
        Some(path) => {
            debug!(config = %path.display(), "loading config file");
            Some(load_config(&path)?)
        }
        None => None,
    };
    resolve_writer_config(args, file.as_ref(), cwd)
}

/// Load the meta-database, resolve configuration and write the declaration file.
pub fn generate(args: &CliArgs, cwd: &Path) -> Result<GenerateSummary> {
    let db = load_database(args, cwd)?;
    let config = resolve_config(args, cwd)?;

    let output = cwd.join(&config.output_to);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let file = fs::File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = DeclarationWriter::new(&db, &config, BufWriter::new(file));
    let stats = writer
        .process()
        .with_context(|| format!("failed to generate {}", output.display()))?;

    info!(
        output = %output.display(),
        classes = stats.classes,
        skipped = stats.skipped,
        "declarations written"
    );
    Ok(GenerateSummary { output, stats })
}

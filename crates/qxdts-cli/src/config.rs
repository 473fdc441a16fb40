use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use qxdts_emitter::WriterConfig;
use qxdts_emitter::config::DEFAULT_OUTPUT;

use crate::args::CliArgs;

/// Configuration file picked up from the working directory when `--config`
/// is not given.
pub const CONFIG_FILE: &str = "qxdts.json";

/// Custom deserializer for ignore entries that accepts a single member name
/// as well as a list. `{ "qx.html.Flash": "setAttribute" }` is common in
/// hand-written configs.
fn deserialize_member_lists<'de, D>(
    deserializer: D,
) -> Result<FxHashMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let raw = Option::<FxHashMap<String, OneOrMany>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(class, members)| {
            let members = match members {
                OneOrMany::One(member) => vec![member],
                OneOrMany::Many(members) => members,
            };
            (class, members)
        })
        .collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QxdtsConfig {
    /// Output path, relative to the config file.
    #[serde(default)]
    pub output_to: Option<String>,
    /// Preamble file, relative to the config file.
    #[serde(default)]
    pub base_declaration: Option<String>,
    /// Class name to members written commented out; merged over the defaults.
    #[serde(default, deserialize_with = "deserialize_member_lists")]
    pub ignore: FxHashMap<String, Vec<String>>,
    /// Legacy type name to replacement; merged over the defaults.
    #[serde(default)]
    pub type_mappings: FxHashMap<String, String>,
    /// Directory of the file this was loaded from.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl QxdtsConfig {
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(path: &Path) -> Result<QxdtsConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config: QxdtsConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}

/// The config file to use: the explicit one (which must exist), or
/// `qxdts.json` in `cwd` when present.
pub fn find_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(cwd.join(path)),
        None => {
            let candidate = cwd.join(CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Build the emitter configuration.
///
/// Precedence, lowest first: built-in defaults (unless disabled), the config
/// file, then command-line flags. Paths from the command line are relative
/// to `cwd`; paths from the config file are relative to that file.
pub fn resolve_writer_config(
    args: &CliArgs,
    file: Option<&QxdtsConfig>,
    cwd: &Path,
) -> Result<WriterConfig> {
    let mut config = WriterConfig::default().with_working_dir(cwd);
    if args.no_default_mappings {
        config.type_mappings.clear();
    }
    if args.no_default_ignores {
        config.ignore.clear();
    }

    if let Some(file) = file {
        if let Some(output_to) = &file.output_to {
            config.output_to = file.resolve(output_to);
        }
        if let Some(base) = &file.base_declaration {
            config.base_declaration = read_base_declaration(&file.resolve(base))?;
        }
        for (class_name, members) in &file.ignore {
            config = config.with_ignored_members(class_name.as_str(), members.iter().cloned());
        }
        for (from, to) in &file.type_mappings {
            config = config.with_type_mapping(from.as_str(), to.as_str());
        }
    }

    if let Some(output) = &args.output {
        config.output_to = output.clone();
    }
    if let Some(base) = &args.base_declaration {
        config.base_declaration = read_base_declaration(&cwd.join(base))?;
    }
    if config.output_to.as_os_str().is_empty() {
        config.output_to = PathBuf::from(DEFAULT_OUTPUT);
    }

    Ok(config)
}

fn read_base_declaration(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read base declaration {}", path.display()))
}

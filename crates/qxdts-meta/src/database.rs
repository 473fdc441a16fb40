//! On-disk meta-database.
//!
//! Layout written by the metadata extractor:
//!
//! ```text
//! compiled/meta/
//!   db.json                 { "classnames": ["qx.core.Object", ...] }
//!   qx/core/Object.json     ClassMeta record
//!   qx/ui/core/Widget.json
//! ```
//!
//! When `db.json` is missing the directory is walked and every `.json` file is
//! treated as a class record.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::index::MetaIndex;
use crate::model::ClassMeta;

#[derive(Debug, Default, Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    classnames: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MetaDatabase {
    root_dir: PathBuf,
    classes: IndexMap<String, ClassMeta>,
}

impl MetaDatabase {
    pub const DATABASE_FILE: &'static str = "db.json";

    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            classes: IndexMap::new(),
        }
    }

    /// Build an in-memory database keyed by each record's class name.
    /// Records without a class name cannot be keyed and are dropped.
    pub fn from_classes(
        root_dir: impl Into<PathBuf>,
        classes: impl IntoIterator<Item = ClassMeta>,
    ) -> Self {
        let mut db = Self::new(root_dir);
        for meta in classes {
            match meta.class_name.clone() {
                Some(name) => db.insert(name, meta),
                None => debug!("dropping class record without a name"),
            }
        }
        db
    }

    /// Load the database rooted at `root_dir`.
    pub fn load(root_dir: impl AsRef<Path>) -> Result<Self> {
        let root_dir = root_dir.as_ref();
        if !root_dir.is_dir() {
            anyhow::bail!("meta directory {} does not exist", root_dir.display());
        }

        let mut db = Self::new(root_dir);
        let db_path = root_dir.join(Self::DATABASE_FILE);
        if db_path.is_file() {
            db.load_listed(&db_path)?;
        } else {
            debug!(root = %root_dir.display(), "no db.json, scanning for class records");
            db.load_scanned()?;
        }
        debug!(classes = db.len(), "meta-database loaded");
        Ok(db)
    }

    fn load_listed(&mut self, db_path: &Path) -> Result<()> {
        let text = fs::read_to_string(db_path)
            .with_context(|| format!("failed to read {}", db_path.display()))?;
        let listing: DatabaseFile = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", db_path.display()))?;

        for name in listing.classnames {
            let path = Self::class_path(&self.root_dir, &name);
            if !path.is_file() {
                warn!(class = %name, path = %path.display(), "listed class has no meta file");
                continue;
            }
            let meta = read_class(&path)?;
            self.insert(name, meta);
        }
        Ok(())
    }

    fn load_scanned(&mut self) -> Result<()> {
        let walker = WalkDir::new(&self.root_dir)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry
                .with_context(|| format!("failed to scan {}", self.root_dir.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some("json")
            {
                continue;
            }
            let meta = read_class(path)?;
            let name = match meta.class_name.clone() {
                Some(name) => name,
                None => Self::class_name_for(&self.root_dir, path),
            };
            self.insert(name, meta);
        }
        Ok(())
    }

    /// `<root>/qx/ui/core/Widget.json` for `qx.ui.core.Widget`.
    pub fn class_path(root_dir: &Path, class_name: &str) -> PathBuf {
        let mut path = root_dir.to_path_buf();
        for segment in class_name.split('.') {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }

    fn class_name_for(root_dir: &Path, path: &Path) -> String {
        let relative = path.strip_prefix(root_dir).unwrap_or(path);
        relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn insert(&mut self, name: impl Into<String>, meta: ClassMeta) {
        self.classes.insert(name.into(), meta);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn read_class(path: &Path) -> Result<ClassMeta> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

impl MetaIndex for MetaDatabase {
    fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    fn meta_data(&self, name: &str) -> Option<&ClassMeta> {
        self.classes.get(name)
    }

    fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

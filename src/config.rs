//! Engine configuration: where the tables live and how output looks by default.

use crate::core::format::OutputFormat;
use crate::core::parser::KeyRadix;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Path of a JSON config file.
pub const CONFIG_ENV: &str = "PINYIN_CONFIG";
/// Overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "PINYIN_DATA_DIR";
/// Overrides `snapshot_path`.
pub const SNAPSHOT_ENV: &str = "PINYIN_SNAPSHOT";

pub const DEFAULT_DATA_DIR: &str = "pinyindb";
pub const DEFAULT_SINGLE_TABLE: &str = "unicode_to_hanyu_pinyin.txt";
pub const DEFAULT_PHRASE_TABLE: &str = "multi_pinyin.txt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinyinConfig {
    /// Directory the two tables are read from.
    pub data_dir: PathBuf,
    /// Resource name of the single-character table.
    pub single_table: String,
    /// Resource name of the phrase table.
    pub phrase_table: String,
    /// How bare numeric keys in both tables are read.
    pub key_radix: KeyRadix,
    /// Prebuilt dictionary, preferred over the text tables when readable.
    pub snapshot_path: Option<PathBuf>,
    pub default_format: OutputFormat,
}

impl Default for PinyinConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            single_table: DEFAULT_SINGLE_TABLE.to_string(),
            phrase_table: DEFAULT_PHRASE_TABLE.to_string(),
            key_radix: KeyRadix::Decimal,
            snapshot_path: None,
            default_format: OutputFormat::default(),
        }
    }
}

impl PinyinConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds the config from `PINYIN_CONFIG`, then applies the directory and
    /// snapshot overrides. A broken config file falls back to defaults.
    pub fn from_env() -> Self {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_json_file(Path::new(&path)).unwrap_or_else(|e| {
                warn!(path = ?path, error = %e, "ignoring unreadable config");
                Self::default()
            }),
            None => Self::default(),
        };

        if let Some(dir) = env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(snapshot) = env::var_os(SNAPSHOT_ENV) {
            config.snapshot_path = Some(PathBuf::from(snapshot));
        }
        config
    }
}

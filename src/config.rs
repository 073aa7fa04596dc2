//! Run configuration: CLI flags merged over JSON config files.
//!
//! Merge order is defaults < global file < project file < CLI flags. The
//! merged [`GenerationConfig`] is built once per run and never mutated.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::warn;

/// Default cap on the staged diff sent to the provider, in bytes.
pub const DEFAULT_MAX_DIFF_SIZE: usize = 10_000;

/// Commit message style requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Conventional,
    Natural,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Conventional => "conventional",
            Style::Natural => "natural",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub style: Style,
    pub provider: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub auto_commit: bool,
    pub explain: bool,
    pub max_diff_size: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            style: Style::Conventional,
            provider: "openrouter".to_string(),
            model: None,
            api_key: None,
            auto_commit: false,
            explain: false,
            max_diff_size: DEFAULT_MAX_DIFF_SIZE,
        }
    }
}

/// Partial configuration as read from a JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub style: Option<Style>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub auto_commit: Option<bool>,
    pub explain: Option<bool>,
    pub max_diff_size: Option<usize>,
}

/// Values supplied on the command line. `None` means the flag was omitted.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub style: Option<Style>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub auto_commit: bool,
    pub explain: bool,
}

/// Path of the global config file, e.g. `~/.config/quill/config.json`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quill").join("config.json"))
}

/// Path of the per-project config file.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".quillrc")
}

/// Read a config file, degrading to `None` on any problem.
///
/// A missing file is normal; an unreadable or invalid one is only warned
/// about so a broken config never blocks a commit.
fn load_file_config(path: &Path) -> Option<FileConfig> {
    if !path.exists() {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("Ignoring invalid config file {}: {}", path.display(), e);
            None
        }
    }
}

fn apply_file(config: &mut GenerationConfig, file: FileConfig) {
    if let Some(style) = file.style {
        config.style = style;
    }
    if let Some(provider) = file.provider {
        config.provider = provider;
    }
    if let Some(model) = file.model {
        config.model = Some(model);
    }
    if let Some(api_key) = file.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(auto_commit) = file.auto_commit {
        config.auto_commit = auto_commit;
    }
    if let Some(explain) = file.explain {
        config.explain = explain;
    }
    if let Some(max_diff_size) = file.max_diff_size {
        config.max_diff_size = max_diff_size;
    }
}

fn merge(
    global: Option<FileConfig>,
    project: Option<FileConfig>,
    cli: CliOverrides,
) -> GenerationConfig {
    let mut config = GenerationConfig::default();

    if let Some(file) = global {
        apply_file(&mut config, file);
    }
    if let Some(file) = project {
        apply_file(&mut config, file);
    }

    if let Some(style) = cli.style {
        config.style = style;
    }
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(model) = cli.model {
        config.model = Some(model);
    }
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }
    if cli.auto_commit {
        config.auto_commit = true;
    }
    if cli.explain {
        config.explain = true;
    }

    config
}

/// Load and merge configuration for a run rooted at `cwd`.
pub fn load_config(cwd: &Path, cli: CliOverrides) -> GenerationConfig {
    let global = global_config_path().and_then(|path| load_file_config(&path));
    let project = load_file_config(&project_config_path(cwd));
    merge(global, project, cli)
}

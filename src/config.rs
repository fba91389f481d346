use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::system::FsOps;

pub const DEFAULT_CONFIG_NAME: &str = "backdate.toml";
pub const DEFAULT_MARKER_FILE: &str = "data.json";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_COMMIT_COUNT: u64 = 150;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, rename = "marker-file")]
    marker_file: Option<PathBuf>,
    #[serde(default)]
    remote: Option<String>,
    #[serde(default, rename = "default-count")]
    default_count: Option<u64>,
    #[serde(default, rename = "scratch-dir")]
    scratch_dir: Option<PathBuf>,
}

/// Everything a run needs to know about the repository it operates on.
#[derive(Debug, Clone)]
pub struct Settings {
    pub repo: PathBuf,
    // Relative to `repo`
    pub marker_file: PathBuf,
    pub remote: String,
    pub default_count: u64,
    pub scratch_dir: PathBuf,
}

impl Settings {
    #[must_use]
    pub fn new(repo: PathBuf) -> Self {
        Self {
            repo,
            marker_file: PathBuf::from(DEFAULT_MARKER_FILE),
            remote: DEFAULT_REMOTE.to_string(),
            default_count: DEFAULT_COMMIT_COUNT,
            scratch_dir: std::env::temp_dir(),
        }
    }

    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.repo.join(&self.marker_file)
    }
}

/// Command-line values that take part in building [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub remote: Option<String>,
}

/// Resolve settings from defaults, the optional config file and CLI overrides, in that
/// order of increasing precedence.
///
/// An explicit `--config` path must exist; the implicit `<repo>/backdate.toml` is only
/// read when present.
///
/// # Errors
/// Returns an error when the config file cannot be read or parsed, or holds invalid values.
pub fn load_settings(overrides: &Overrides, fs: &dyn FsOps) -> Result<Settings, Error> {
    let repo = fs.expand_tilde(overrides.repo.as_deref().unwrap_or(Path::new(".")));
    let mut settings = Settings::new(repo);

    let file = match &overrides.config {
        Some(path) => Some(load_config(&fs.expand_tilde(path))?),
        None => {
            let implicit = settings.repo.join(DEFAULT_CONFIG_NAME);
            if implicit.is_file() {
                Some(load_config(&implicit)?)
            } else {
                None
            }
        }
    };

    if let Some(file) = file {
        if let Some(marker_file) = file.marker_file {
            settings.marker_file = marker_file;
        }
        if let Some(remote) = file.remote {
            settings.remote = remote;
        }
        if let Some(count) = file.default_count {
            settings.default_count = count;
        }
        if let Some(dir) = file.scratch_dir {
            settings.scratch_dir = fs.expand_tilde(&dir);
        }
    }
    if let Some(remote) = &overrides.remote {
        settings.remote.clone_from(remote);
    }

    validate(&settings)?;
    Ok(settings)
}

fn load_config(path: &Path) -> Result<ConfigFile, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate(settings: &Settings) -> Result<(), Error> {
    if settings.marker_file.as_os_str().is_empty() || settings.marker_file.is_absolute() {
        return Err(Error::InvalidConfig {
            message: format!(
                "marker-file must be a path relative to the repository, found '{}'",
                settings.marker_file.display()
            ),
        });
    }
    if settings.remote.trim().is_empty() {
        return Err(Error::InvalidConfig {
            message: "remote must not be empty".to_string(),
        });
    }
    Ok(())
}

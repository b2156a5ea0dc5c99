//! Configuration file discovery and loading.
//!
//! This module finds the configuration file to use when none is given
//! explicitly, and loads a resolved file into a [`Tree`].

use crate::error::Result;
use crate::format::Format;
use crate::tree::Tree;
use std::path::{Path, PathBuf};

/// File stems tried in every search directory, in order.
pub const BASE_NAMES: [&str; 3] = ["config", "settings", "app_config"];

/// Extensions tried for every base name, in order.
pub const EXTENSIONS: [&str; 5] = [".yaml", ".yml", ".json", ".ini", ".conf"];

/// A loaded configuration file.
///
/// # Examples
///
/// ```
/// use tiers::config::ConfigSource;
/// use tiers::{Format, Tree};
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("/etc/app/config.yaml"),
///     format: Format::Yaml,
///     tree: Tree::new(),
/// };
/// assert!(source.tree.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Format it was parsed as.
    pub format: Format,
    /// Parsed contents.
    pub tree: Tree,
}

/// Locates and loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use tiers::config::ConfigLoader;
///
/// if let Some(path) = ConfigLoader::find(&ConfigLoader::default_search_paths()) {
///     println!("using {}", path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// The directories searched when no search path is configured.
    ///
    /// In order: `~/.config`, `/etc`, `/etc/app`, and the current directory.
    /// The first entry is omitted when the home directory is unknown.
    #[must_use]
    pub fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(4);
        if let Some(home) = home::home_dir() {
            paths.push(home.join(".config"));
        }
        paths.push(PathBuf::from("/etc"));
        paths.push(PathBuf::from("/etc/app"));
        paths.push(PathBuf::from("."));
        paths
    }

    /// Every candidate file for `search_paths`, in priority order.
    ///
    /// Directory order dominates, then base name, then extension.
    #[must_use]
    pub fn candidates(search_paths: &[PathBuf]) -> Vec<PathBuf> {
        search_paths
            .iter()
            .flat_map(|dir| {
                BASE_NAMES.iter().flat_map(move |name| {
                    EXTENSIONS
                        .iter()
                        .map(move |ext| dir.join(format!("{name}{ext}")))
                })
            })
            .collect()
    }

    /// The first existing candidate file, if any.
    #[must_use]
    pub fn find(search_paths: &[PathBuf]) -> Option<PathBuf> {
        Self::candidates(search_paths)
            .into_iter()
            .find(|candidate| candidate.is_file())
    }

    /// Load and parse a configuration file.
    ///
    /// The declared format wins; otherwise it is detected from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`](crate::Error::FileAccess) if the file is
    /// missing or unreadable, and [`Error::Format`](crate::Error::Format) if
    /// it cannot be parsed.
    pub fn load_file(path: &Path, declared: Option<Format>) -> Result<ConfigSource> {
        let format = Format::resolve(declared, path);
        let tree = format.load(path)?;
        log::debug!(
            "parsed {} as {format}: {} top-level keys",
            path.display(),
            tree.len()
        );
        Ok(ConfigSource {
            path: path.to_path_buf(),
            format,
            tree,
        })
    }
}

/// Free-function form of [`ConfigLoader::find`].
#[must_use]
pub fn find_config_file(search_paths: &[PathBuf]) -> Option<PathBuf> {
    ConfigLoader::find(search_paths)
}

/// Free-function form of [`ConfigLoader::default_search_paths`].
#[must_use]
pub fn default_search_paths() -> Vec<PathBuf> {
    ConfigLoader::default_search_paths()
}

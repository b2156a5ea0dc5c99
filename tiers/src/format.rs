//! Reading and writing configuration files.
//!
//! Each supported [`Format`] turns file contents into a [`Tree`] and back.
//! The rest of the library never looks at formats directly; it only sees
//! trees.
//!
//! - YAML through `serde_yaml`. An empty document is an empty tree.
//! - JSON through `serde_json`.
//! - INI through `rust-ini`. Sections become nested trees of string values,
//!   keys are lower-cased, and `[DEFAULT]` values are inherited by every
//!   other section. Values are never coerced.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use ini::{EscapePolicy, Ini, ParseOption};

use crate::error::{Error, Result};
use crate::tree::{Tree, Value};

/// Name of the INI section whose values every other section inherits.
const INI_DEFAULT_SECTION: &str = "DEFAULT";

/// A configuration file format.
///
/// # Examples
///
/// ```
/// use tiers::Format;
/// use std::path::Path;
///
/// assert_eq!(Format::from_path(Path::new("app.yml")), Format::Yaml);
/// assert_eq!(Format::from_path(Path::new("app.conf")), Format::Ini);
/// assert_eq!(Format::from_path(Path::new("app.txt")), Format::Yaml);
/// assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// YAML documents.
    #[default]
    Yaml,
    /// JSON documents.
    Json,
    /// INI files with `[section]` headers.
    Ini,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Ini => write!(f, "ini"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "ini" | "conf" => Ok(Self::Ini),
            _ => Err(format!("unsupported config format: {s}")),
        }
    }
}

impl Format {
    /// Every format, in the order their extensions are searched.
    pub const ALL: [Format; 3] = [Format::Yaml, Format::Json, Format::Ini];

    /// Detect the format from a file extension.
    ///
    /// `.yaml`/`.yml` are YAML, `.json` is JSON, `.ini`/`.conf` are INI, and
    /// anything else (including no extension) falls back to YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }

    /// The declared format if there is one, else the one detected from `path`.
    #[must_use]
    pub fn resolve(declared: Option<Self>, path: &Path) -> Self {
        declared.unwrap_or_else(|| Self::from_path(path))
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the file is missing or unreadable,
    /// and [`Error::Format`] if its contents are malformed or the document is
    /// not a mapping.
    pub fn load(self, path: &Path) -> Result<Tree> {
        if !path.exists() {
            return Err(Error::file_access(path, "config file does not exist"));
        }
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => Error::Format {
                format: self,
                path: Some(path.to_path_buf()),
                message: e.to_string(),
            },
            _ => Error::file_access(path, format!("failed to read: {e}")),
        })?;
        self.parse(&contents).map_err(|e| match e {
            Error::Format {
                format, message, ..
            } => Error::Format {
                format,
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the text is malformed or the document is
    /// not a mapping.
    pub fn parse(self, contents: &str) -> Result<Tree> {
        match self {
            Self::Yaml => parse_yaml(contents),
            Self::Json => parse_json(contents),
            Self::Ini => parse_ini(contents),
        }
        .map_err(|message| Error::Format {
            format: self,
            path: None,
            message,
        })
    }

    /// Serialize a tree to text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the serializer rejects the tree.
    pub fn render(self, tree: &Tree) -> Result<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(tree).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(tree)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| e.to_string()),
            Self::Ini => render_ini(tree),
        }
        .map_err(|message| Error::Format {
            format: self,
            path: None,
            message,
        })
    }

    /// Serialize any value, not only a whole document.
    ///
    /// Sections render as with [`render`](Self::render). INI can only
    /// represent sections, so other values are rejected for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the value cannot be represented.
    pub fn render_value(self, value: &Value) -> Result<String> {
        let rendered = match (self, value) {
            (_, Value::Tree(tree)) => return self.render(tree),
            (Self::Yaml, other) => serde_yaml::to_string(other).map_err(|e| e.to_string()),
            (Self::Json, other) => serde_json::to_string_pretty(other).map_err(|e| e.to_string()),
            (Self::Ini, other) => Err(format!(
                "only sections can be written as ini, found {}",
                other.type_name()
            )),
        };
        rendered.map_err(|message| Error::Format {
            format: self,
            path: None,
            message,
        })
    }

    /// Serialize a tree and write it to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the directory or file cannot be
    /// written, and [`Error::Format`] if serialization fails.
    pub fn save(self, tree: &Tree, path: &Path) -> Result<()> {
        let text = self.render(tree)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::file_access(path, format!("failed to create directory: {e}"))
            })?;
        }
        fs::write(path, text).map_err(|e| Error::file_access(path, format!("failed to write: {e}")))
    }
}

fn parse_yaml(contents: &str) -> std::result::Result<Tree, String> {
    let document: serde_yaml::Value = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
    match yaml_to_value(document)? {
        Value::Null => Ok(Tree::new()),
        Value::Tree(tree) => Ok(tree),
        other => Err(format!(
            "top-level document must be a mapping, found {}",
            other.type_name()
        )),
    }
}

fn yaml_to_value(value: serde_yaml::Value) -> std::result::Result<Value, String> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(yaml_to_value)
                .collect::<std::result::Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut tree = Tree::new();
            for (key, value) in mapping {
                tree.insert(yaml_key(key)?, yaml_to_value(value)?);
            }
            Value::Tree(tree)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> std::result::Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported mapping key: {other:?}")),
    }
}

fn parse_json(contents: &str) -> std::result::Result<Tree, String> {
    match serde_json::from_str(contents).map_err(|e| e.to_string())? {
        serde_json::Value::Object(map) => Ok(Tree::from(map)),
        other => Err(format!(
            "top-level document must be a mapping, found {}",
            Value::from(other).type_name()
        )),
    }
}

fn parse_ini(contents: &str) -> std::result::Result<Tree, String> {
    let option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(contents, option).map_err(|e| e.to_string())?;

    let inherited: Vec<(String, String)> = ini
        .section(Some(INI_DEFAULT_SECTION))
        .map(|props| {
            props
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mut tree = Tree::new();
    for (section, props) in &ini {
        match section {
            None => {
                for (key, value) in props.iter() {
                    tree.insert(key.to_lowercase(), value);
                }
            }
            Some(INI_DEFAULT_SECTION) => {}
            Some(name) => {
                let slot = tree.set_default(name, Tree::new());
                let Some(section_tree) = slot.as_tree_mut() else {
                    return Err(format!("section [{name}] collides with a top-level key"));
                };
                for (key, value) in &inherited {
                    section_tree.set_default(key.as_str(), value.as_str());
                }
                for (key, value) in props.iter() {
                    section_tree.insert(key.to_lowercase(), value);
                }
            }
        }
    }
    Ok(tree)
}

fn render_ini(tree: &Tree) -> std::result::Result<String, String> {
    let mut ini = Ini::new();
    for (name, value) in tree.iter() {
        match value {
            Value::Tree(section) => {
                for (key, member) in section.iter() {
                    if let Some(text) = ini_scalar(member) {
                        ini.with_section(Some(name)).set(key, text);
                    }
                }
            }
            other => {
                if let Some(text) = ini_scalar(other) {
                    ini.with_section(None::<String>).set(name, text);
                }
            }
        }
    }
    let mut buf = Vec::new();
    ini.write_to_policy(&mut buf, EscapePolicy::Nothing)
        .map_err(|e| e.to_string())?;
    String::from_utf8(buf).map_err(|e| e.to_string())
}

// INI has no nesting, so sections and sequences are dropped.
fn ini_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Tree(_) | Value::Sequence(_) => None,
        Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ClientConfig;

/// Error type for config file I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
}

/// Default location: `<config_dir>/darkroom/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("darkroom")
        .join("config.toml")
}

/// Read the config. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ClientConfig::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(toml::from_str(&text)?)
}

/// Read the raw document for round-trip-safe editing. A missing file is an
/// empty document.
pub fn read_config_doc(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(path, doc.to_string()).map_err(write_err)
}

/// Set `server.url` in the config document
pub fn set_server_url(doc: &mut toml_edit::DocumentMut, url: &str) {
    if !doc.contains_key("server") {
        doc["server"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["server"]["url"] = toml_edit::value(url);
}

/// Set or remove `server.cookie`
pub fn set_server_cookie(doc: &mut toml_edit::DocumentMut, cookie: Option<&str>) {
    if !doc.contains_key("server") {
        doc["server"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    match cookie {
        Some(c) => doc["server"]["cookie"] = toml_edit::value(c),
        None => {
            if let Some(table) = doc["server"].as_table_mut() {
                table.remove("cookie");
            }
        }
    }
}

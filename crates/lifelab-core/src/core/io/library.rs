//! Loading a pattern library from a TOML file.
//!
//! The expected layout is one table per category, one array of row-art
//! strings per pattern:
//!
//! ```toml
//! [spaceships]
//! glider = ["_#_", "__#", "###"]
//!
//! [still_lifes]
//! block = ["##", "##"]
//! ```
//!
//! The engine never reads from disk; this module exists so front-ends can
//! build a [`PatternLibrary`] from user-supplied files.

use crate::core::models::pattern::{PatternLibrary, PatternTemplate, TemplateError};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Bad template '{category}/{name}': {source}")]
    BadTemplate {
        category: String,
        name: String,
        source: TemplateError,
    },
}

pub fn load_library(path: &Path) -> Result<PatternLibrary, LibraryLoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LibraryLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let raw: BTreeMap<String, BTreeMap<String, Vec<String>>> =
        toml::from_str(&content).map_err(|e| LibraryLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

    let mut library = PatternLibrary::new();
    for (category, patterns) in &raw {
        for (name, rows) in patterns {
            let template = PatternTemplate::from_rows(category, name, rows).map_err(|e| {
                LibraryLoadError::BadTemplate {
                    category: category.clone(),
                    name: name.clone(),
                    source: e,
                }
            })?;
            library.insert(template);
        }
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_library(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_a_well_formed_library() {
        let (_dir, path) = write_library(
            r####"
[spaceships]
glider = ["_#_", "__#", "###"]

[still_lifes]
block = ["##", "##"]
"####,
        );

        let library = load_library(&path).unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("spaceships", "glider").unwrap().population(), 5);
        assert_eq!(library.get("still_lifes", "block").unwrap().rows(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_library(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(LibraryLoadError::Io { .. })));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let (_dir, path) = write_library("this is not toml = [");
        let result = load_library(&path);
        assert!(matches!(result, Err(LibraryLoadError::Toml { .. })));
    }

    #[test]
    fn bad_row_art_names_the_offending_template() {
        let (_dir, path) = write_library(
            r##"
[oscillators]
blinker = ["#*#"]
"##,
        );

        match load_library(&path) {
            Err(LibraryLoadError::BadTemplate {
                category,
                name,
                source,
            }) => {
                assert_eq!(category, "oscillators");
                assert_eq!(name, "blinker");
                assert_eq!(source, TemplateError::BadCell { found: '*' });
            }
            other => panic!("expected BadTemplate, got {:?}", other),
        }
    }
}

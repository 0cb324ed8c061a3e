use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_SEED: &str = include_str!("../../data/extensions.json");

/// Stable handle for a record, assigned from its position in the seed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId(usize);

impl ExtensionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ext-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionRecord {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub is_active: bool,
}

impl ExtensionRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        logo: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            logo: logo.into(),
            is_active,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate extension name in seed data: {0}")]
    DuplicateName(String),
}

/// Reads the seed list from `path`, or the bundled fixture when no path is given.
pub fn load_seed(path: Option<&Path>) -> Result<Vec<ExtensionRecord>, CatalogError> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_seed(&raw)
        }
        None => parse_seed(BUILTIN_SEED),
    }
}

pub fn parse_seed(raw: &str) -> Result<Vec<ExtensionRecord>, CatalogError> {
    let records: Vec<ExtensionRecord> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.name.as_str()) {
            return Err(CatalogError::DuplicateName(record.name.clone()));
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_seed_parses() {
        let records = load_seed(None).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(records[0].name, "DevLens");
        assert!(records[0].is_active);
        assert!(!records[2].is_active);
    }

    #[test]
    fn seed_uses_camel_case_active_flag() {
        let records = parse_seed(
            r#"[{"name":"A","description":"a","logo":"a.svg","isActive":true}]"#,
        )
        .unwrap();
        assert_eq!(records, vec![ExtensionRecord::new("A", "a", "a.svg", true)]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let raw = r#"[
            {"name":"A","description":"","logo":"","isActive":true},
            {"name":"A","description":"","logo":"","isActive":false}
        ]"#;
        match parse_seed(raw) {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "A"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn seed_file_overrides_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"Only","description":"d","logo":"l","isActive":false}}]"#
        )
        .unwrap();

        let records = load_seed(Some(file.path())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Only");
    }

    #[test]
    fn missing_seed_file_reports_path() {
        let err = load_seed(Some(Path::new("/nonexistent/seed.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/seed.json"));
    }
}

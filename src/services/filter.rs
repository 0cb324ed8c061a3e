use crate::services::catalog::{ExtensionId, ExtensionRecord};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Inactive,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Inactive];

    /// Only the exact keys are recognised; anything else selects everything.
    pub fn from_key(key: &str) -> Self {
        match key {
            "active" => Filter::Active,
            "inactive" => Filter::Inactive,
            _ => Filter::All,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Inactive => "Inactive",
        }
    }

    pub fn matches(self, record: &ExtensionRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => record.is_active,
            Filter::Inactive => !record.is_active,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterManager {
    current: Filter,
}

impl FilterManager {
    pub fn new(current: Filter) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Filter {
        self.current
    }

    pub fn set_current(&mut self, filter: Filter) {
        self.current = filter;
    }

    /// Records matching `filter` (or the current filter), in seed order.
    pub fn get<'a>(
        &self,
        records: &'a [ExtensionRecord],
        filter: Option<Filter>,
    ) -> Vec<(ExtensionId, &'a ExtensionRecord)> {
        let filter = filter.unwrap_or(self.current);
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(index, record)| (ExtensionId::new(index), record))
            .collect()
    }
}

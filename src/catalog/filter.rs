//! Category filtering and substring search over endpoint records

use super::EndpointRecord;

/// Sentinel category key selecting every record
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a category key; missing, empty or `all` select everything
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            None | Some("") | Some(ALL_CATEGORIES) => Self::All,
            Some(name) => Self::Named(name.to_string()),
        }
    }

    /// Key used in links and forms
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    pub fn admits(&self, record: &EndpointRecord) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => record.category == *name,
        }
    }
}

/// A record that survived filtering, with its position in the flattened list
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub index: usize,
    pub record: &'a EndpointRecord,
}

/// Catalog UI filter state: current category and free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub category: CategoryFilter,
    pub query: String,
}

impl CatalogState {
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// Build state from raw request values
    pub fn from_params(category: Option<&str>, query: Option<&str>) -> Self {
        Self::new(CategoryFilter::from_key(category), query.unwrap_or_default())
    }

    /// Switch category. The query is kept.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Drop the query, leaving only the category restriction
    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Restrict to the current category, then to records matching the query
    pub fn apply<'a>(&self, records: &'a [EndpointRecord]) -> Vec<Match<'a>> {
        let term = self.has_query().then(|| self.query.to_lowercase());

        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.category.admits(record))
            .filter(|(_, record)| term.as_deref().map_or(true, |t| matches_term(record, t)))
            .map(|(index, record)| Match { index, record })
            .collect()
    }
}

/// Case-insensitive substring match on name, description or category.
/// `term` must already be lower-cased.
pub fn matches_term(record: &EndpointRecord, term: &str) -> bool {
    record.name().to_lowercase().contains(term)
        || record.desc().to_lowercase().contains(term)
        || record.category.to_lowercase().contains(term)
}

//! Endpoint catalog: the descriptor flattened into category-annotated records

mod filter;

pub use filter::{CatalogState, CategoryFilter, Match, ALL_CATEGORIES};

use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Descriptor, EndpointItem};

/// One descriptor item merged with its owning category's metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    #[serde(flatten)]
    pub item: EndpointItem,
    pub category: String,
    pub category_icon: String,
    pub category_color: String,
}

impl EndpointRecord {
    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn desc(&self) -> &str {
        &self.item.desc
    }
}

/// A loaded descriptor plus its flattened records
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptor: Descriptor,
    records: Vec<EndpointRecord>,
}

impl Catalog {
    /// Flatten a descriptor. Records keep category order, then item order.
    pub fn from_descriptor(descriptor: Descriptor) -> Self {
        let records = descriptor
            .categories
            .iter()
            .flat_map(|category| {
                category.items.iter().map(move |item| EndpointRecord {
                    item: item.clone(),
                    category: category.name.clone(),
                    category_icon: category.icon.clone(),
                    category_color: category.color.clone(),
                })
            })
            .collect();

        Self { descriptor, records }
    }

    /// Parse descriptor JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: Descriptor = serde_json::from_str(json)
            .map_err(|e| Error::Descriptor(format!("Malformed descriptor: {}", e)))?;
        Ok(Self::from_descriptor(descriptor))
    }

    /// Read and parse a descriptor file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Descriptor(format!("Could not read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&content)?;

        tracing::debug!(
            path = %path.display(),
            endpoints = catalog.len(),
            categories = catalog.category_count(),
            "Loaded descriptor"
        );

        Ok(catalog)
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> Descriptor {
        self.descriptor
    }

    pub fn records(&self) -> &[EndpointRecord] {
        &self.records
    }

    /// Record at a flattened index
    pub fn get(&self, index: usize) -> Option<&EndpointRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.descriptor.categories.len()
    }

    /// Records visible under the given UI state
    pub fn filter(&self, state: &CatalogState) -> Vec<Match<'_>> {
        state.apply(&self.records)
    }
}

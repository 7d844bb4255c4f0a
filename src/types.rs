//! Descriptor data model shared by the server and the catalog UI

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Creator injected into JSON replies when the descriptor names none
pub const DEFAULT_CREATOR: &str = "Created Using Elle UI";

/// Method assumed when an item omits one
pub const DEFAULT_METHOD: &str = "GET";

/// The JSON configuration enumerating categories and endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub header: HeaderInfo,
    #[serde(default)]
    pub api_settings: ApiSettings,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderInfo {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub creator: Option<String>,
}

impl Descriptor {
    /// Creator injected into every JSON response
    pub fn creator(&self) -> &str {
        self.api_settings
            .creator
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CREATOR)
    }

    /// Total number of items across all categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub items: Vec<EndpointItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointItem {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub path: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

impl EndpointItem {
    /// HTTP method, GET when unset
    pub fn method(&self) -> &str {
        self.method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD)
    }

    /// Path with any example `?query` suffix removed
    pub fn display_path(&self) -> &str {
        self.path.split('?').next().unwrap_or_default()
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

/// A declared parameter: name and human-readable description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub description: String,
}

/// Declared parameters in descriptor order. Every parameter is a required text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new(params: Vec<Param>) -> Self {
        Self(params)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.name.as_str())
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for param in &self.0 {
            map.serialize_entry(&param.name, &param.description)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = Params;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parameter names to descriptions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Params, A::Error> {
                let mut params: Vec<Param> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, description)) = access.next_entry::<String, String>()? {
                    // Later duplicates replace the earlier description in place
                    match params.iter_mut().find(|p| p.name == name) {
                        Some(existing) => existing.description = description,
                        None => params.push(Param { name, description }),
                    }
                }
                Ok(Params(params))
            }

            fn visit_unit<E>(self) -> Result<Params, E> {
                Ok(Params::default())
            }
        }

        deserializer.deserialize_any(ParamsVisitor)
    }
}

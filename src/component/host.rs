use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Host-side element a component instance is attached to.
///
/// Components read their initial configuration from its attributes in
/// `init`; later changes arrive through attribute change notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostElement {
    #[serde(default)]
    tag: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl HostElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Parse an attribute, treating unparseable values as absent.
    pub fn parse_attribute<T: FromStr>(&self, name: &str) -> Option<T> {
        self.attribute(name)?.trim().parse().ok()
    }

    /// Set (`Some`) or remove (`None`) an attribute, returning the old value.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Option<String> {
        match value {
            Some(value) => self.attributes.insert(name.to_string(), value.to_string()),
            None => self.attributes.remove(name),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

//! Fixture catalog: load units and standard connection size per fixture.
//!
//! Entries are keyed by fixture name plus the population that uses it
//! (public buildings vs. private dwellings), because the same fixture
//! carries different load units in each. User-added entries may belong to
//! neither and are persisted under their bare name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    Public,
    Private,
    /// Neither category; the key carries no suffix.
    Other,
}

impl Population {
    /// Suffix tag used in persisted keys.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Population::Public => Some("公"),
            Population::Private => Some("私"),
            Population::Other => None,
        }
    }
}

/// Structured fixture key.
///
/// Persisted as `"<name> (公)"`, `"<name> (私)"` or a bare `"<name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixtureKey {
    pub name: String,
    pub population: Population,
}

impl FixtureKey {
    pub fn new(name: impl Into<String>, population: Population) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, Population::Public)
    }

    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, Population::Private)
    }

    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, Population::Other)
    }
}

impl fmt::Display for FixtureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.population.tag() {
            Some(tag) => write!(f, "{} ({tag})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl FromStr for FixtureKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        for population in [Population::Public, Population::Private] {
            let Some(tag) = population.tag() else { continue };
            if let Some(name) = s.strip_suffix(format!(" ({tag})").as_str()) {
                return Ok(Self::new(name.trim_end(), population));
            }
        }
        if s.is_empty() || s.starts_with('(') {
            return Err(CatalogError::InvalidFixtureKey { key: s.to_string() });
        }
        Ok(Self::other(s))
    }
}

impl TryFrom<String> for FixtureKey {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FixtureKey> for String {
    fn from(key: FixtureKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureSpec {
    /// Load units (dimensionless simultaneous-demand weight).
    #[serde(rename = "lu")]
    pub load_units: f64,
    /// Standard connection size as a steel-style nominal code (15, 20, ...).
    #[serde(rename = "size_a")]
    pub standard_size: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureCatalog {
    specs: BTreeMap<FixtureKey, FixtureSpec>,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let specs = BUILTIN
            .iter()
            .map(|&(name, population, load_units, standard_size)| {
                (
                    FixtureKey::new(name, population),
                    FixtureSpec {
                        load_units,
                        standard_size,
                    },
                )
            })
            .collect();
        Self { specs }
    }

    pub fn get(&self, key: &FixtureKey) -> Option<&FixtureSpec> {
        self.specs.get(key)
    }

    pub fn insert(&mut self, key: FixtureKey, spec: FixtureSpec) -> Option<FixtureSpec> {
        self.specs.insert(key, spec)
    }

    pub fn remove(&mut self, key: &FixtureKey) -> Option<FixtureSpec> {
        self.specs.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FixtureKey, &FixtureSpec)> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Fixture names available to one population, in key order.
    pub fn names(&self, population: Population) -> Vec<&str> {
        self.specs
            .keys()
            .filter(|k| k.population == population)
            .map(|k| k.name.as_str())
            .collect()
    }
}

impl FromIterator<(FixtureKey, FixtureSpec)> for FixtureCatalog {
    fn from_iter<I: IntoIterator<Item = (FixtureKey, FixtureSpec)>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

const BUILTIN: &[(&str, Population, f64, u32)] = &[
    ("大便器 (洗浄弁)", Population::Public, 10.0, 25),
    ("大便器 (タンク)", Population::Public, 5.0, 15),
    ("小便器 (洗浄弁)", Population::Public, 5.0, 15),
    ("小便器 (タンク)", Population::Public, 3.0, 15),
    ("洗面器", Population::Public, 2.0, 15),
    ("手洗器", Population::Public, 0.5, 15),
    ("掃除用流し", Population::Public, 4.0, 20),
    ("厨房流し", Population::Public, 4.0, 20),
    ("シャワー", Population::Public, 4.0, 20),
    ("大便器 (洗浄弁)", Population::Private, 6.0, 25),
    ("大便器 (タンク)", Population::Private, 3.0, 15),
    ("小便器 (洗浄弁)", Population::Private, 5.0, 15),
    ("小便器 (タンク)", Population::Private, 3.0, 15),
    ("洗面器", Population::Private, 1.0, 15),
    ("手洗器", Population::Private, 1.0, 15),
    ("台所流し", Population::Private, 3.0, 20),
    ("浴槽", Population::Private, 2.0, 20),
    ("シャワー", Population::Private, 2.0, 15),
    ("洗濯機", Population::Private, 2.0, 15),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parses_suffix_and_keeps_inner_parentheses() {
        let key: FixtureKey = "大便器 (タンク) (私)".parse().unwrap();
        assert_eq!(key.name, "大便器 (タンク)");
        assert_eq!(key.population, Population::Private);
        assert_eq!(key.to_string(), "大便器 (タンク) (私)");

        let key: FixtureKey = "洗面器 (公)".parse().unwrap();
        assert_eq!(key, FixtureKey::public("洗面器"));
    }

    #[test]
    fn bare_key_is_other_population() {
        let key: FixtureKey = "散水栓".parse().unwrap();
        assert_eq!(key, FixtureKey::other("散水栓"));
        assert_eq!(key.to_string(), "散水栓");

        let key: FixtureKey = "大便器 (タンク)".parse().unwrap();
        assert_eq!(key.population, Population::Other);
        assert_eq!(key.name, "大便器 (タンク)");
    }

    #[test]
    fn key_without_name_is_rejected() {
        assert!(" (公)".parse::<FixtureKey>().is_err());
        assert!("(私)".parse::<FixtureKey>().is_err());
        assert!("   ".parse::<FixtureKey>().is_err());
    }

    #[test]
    fn builtin_catalog_contents() {
        let catalog = FixtureCatalog::builtin();
        assert_eq!(catalog.len(), 19);
        let tank = catalog.get(&FixtureKey::private("大便器 (タンク)")).unwrap();
        assert_eq!(tank.load_units, 3.0);
        assert_eq!(tank.standard_size, 15);
        assert_eq!(catalog.names(Population::Public).len(), 9);
        assert_eq!(catalog.names(Population::Private).len(), 10);
    }

    #[test]
    fn catalog_serializes_with_string_keys() {
        let mut catalog = FixtureCatalog::new();
        catalog.insert(
            FixtureKey::public("洗面器"),
            FixtureSpec {
                load_units: 2.0,
                standard_size: 15,
            },
        );
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"洗面器 (公)":{"lu":2.0,"size_a":15}}"#);
        let back: FixtureCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);

        catalog.insert(
            FixtureKey::other("散水栓"),
            FixtureSpec {
                load_units: 2.0,
                standard_size: 20,
            },
        );
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains(r#""散水栓":{"lu":2.0,"size_a":20}"#));
        let back: FixtureCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}

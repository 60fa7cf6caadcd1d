//! Collision-safe identifier minting.
//!
//! Minting always sees a whole column before handing out a single
//! identifier: whether a key needs an ordinal, and how wide that ordinal
//! is, depends on every other key in the table. Rows are processed in the
//! order given, which for loaded tables is file order.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::clean::clean_key;
use crate::graph::Namespace;
use crate::vocab::EntityClass;

/// A canonical identifier: the local part of an entity IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    class: EntityClass,
    local: String,
}

impl Identifier {
    /// Identifier for a key that occurs once in its table: `<tag>_<key>`.
    pub fn unique(class: EntityClass, cleaned_key: &str) -> Self {
        Self {
            class,
            local: format!("{}_{}", class.tag(), cleaned_key),
        }
    }

    /// Identifier for the `ordinal`-th occurrence of a repeated key:
    /// `<tag><ordinal>_<key>`, the ordinal zero-padded to `width` digits.
    pub fn repeated(class: EntityClass, cleaned_key: &str, ordinal: usize, width: usize) -> Self {
        Self {
            class,
            local: format!("{}{:0width$}_{}", class.tag(), ordinal, cleaned_key),
        }
    }

    /// Natural key of an entity that is identified by two parents.
    pub fn composite_key(first: &Identifier, second: &Identifier) -> String {
        format!("{}_{}", first.local, second.local)
    }

    pub fn class(&self) -> EntityClass {
        self.class
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Full IRI under `ns`.
    pub fn iri(&self, ns: &Namespace) -> String {
        ns.term(&self.local)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local)
    }
}

/// Mints identifiers for one class.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierMinter {
    class: EntityClass,
}

impl IdentifierMinter {
    pub fn new(class: EntityClass) -> Self {
        Self { class }
    }

    /// Mint identifiers for a column of natural keys, one entry per row.
    ///
    /// Missing keys (`None`) get no identifier. Keys are compared after
    /// cleaning, so `"Jane Smith"` and `"Jane.Smith"` collide and are
    /// disambiguated like any other repeat.
    pub fn mint<'a, I>(&self, keys: I) -> IdentityIndex
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let raw: Vec<Option<&str>> = keys
            .into_iter()
            .map(|k| k.map(str::trim).filter(|k| !k.is_empty()))
            .collect();
        let cleaned: Vec<Option<String>> = raw.iter().map(|k| k.map(clean_key)).collect();

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for key in cleaned.iter().flatten() {
            *counts.entry(key.as_str()).or_insert(0) += 1;
        }

        let max_repeat = counts.values().copied().filter(|&c| c > 1).max().unwrap_or(0);
        let width = ordinal_width(max_repeat);

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut ids = Vec::with_capacity(cleaned.len());
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();

        for (row, key) in cleaned.iter().enumerate() {
            let Some(key) = key.as_deref() else {
                ids.push(None);
                continue;
            };

            let id = if counts[key] == 1 {
                Identifier::unique(self.class, key)
            } else {
                let ordinal = seen.entry(key).or_insert(0);
                let id = Identifier::repeated(self.class, key, *ordinal, width);
                *ordinal += 1;
                id
            };

            if let Some(raw_key) = raw[row] {
                by_key.entry(raw_key.to_string()).or_default().push(row);
            }
            ids.push(Some(id));
        }

        IdentityIndex {
            class: self.class,
            ids,
            by_key,
            repeated_keys: counts.values().filter(|&&c| c > 1).count(),
            ordinal_width: width,
        }
    }
}

/// Digits needed for ordinals `0..max_repeat`, at least one.
fn ordinal_width(max_repeat: usize) -> usize {
    let mut largest = max_repeat.saturating_sub(1);
    let mut width = 1;
    while largest >= 10 {
        largest /= 10;
        width += 1;
    }
    width
}

/// Identifiers minted for one table, addressable by row and by natural key.
#[derive(Debug, Clone)]
pub struct IdentityIndex {
    class: EntityClass,
    ids: Vec<Option<Identifier>>,
    by_key: HashMap<String, Vec<usize>>,
    repeated_keys: usize,
    ordinal_width: usize,
}

impl IdentityIndex {
    pub fn class(&self) -> EntityClass {
        self.class
    }

    /// Identifier of a row, if it had a key.
    pub fn get(&self, row: usize) -> Option<&Identifier> {
        self.ids.get(row).and_then(|id| id.as_ref())
    }

    /// Every identifier minted for a raw natural key, in row order.
    ///
    /// More than one result means the key was repeated in the table.
    pub fn lookup(&self, key: &str) -> Vec<&Identifier> {
        self.by_key
            .get(key.trim())
            .map(|rows| rows.iter().filter_map(|&row| self.get(row)).collect())
            .unwrap_or_default()
    }

    /// `(row, identifier)` for every minted row, in row order.
    pub fn minted(&self) -> impl Iterator<Item = (usize, &Identifier)> {
        self.ids
            .iter()
            .enumerate()
            .filter_map(|(row, id)| id.as_ref().map(|id| (row, id)))
    }

    /// Number of rows that received an identifier.
    pub fn minted_count(&self) -> usize {
        self.ids.iter().filter(|id| id.is_some()).count()
    }

    /// Number of rows the index was built from.
    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    /// Rows without a key, in row order.
    pub fn unkeyed_rows(&self) -> impl Iterator<Item = usize> {
        self.ids
            .iter()
            .enumerate()
            .filter_map(|(row, id)| id.is_none().then_some(row))
    }

    /// Number of distinct cleaned keys that needed ordinals.
    pub fn repeated_keys(&self) -> usize {
        self.repeated_keys
    }

    pub fn ordinal_width(&self) -> usize {
        self.ordinal_width
    }
}

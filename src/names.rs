// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

#[cfg(feature = "serde")]
use crate::ByteSpan;
#[cfg(feature = "serde")]
use crate::error::BankError;
use crate::fnv::hash_name;

/// Remaps event ids that changed between content versions back to ids we have names for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    /// The content version this table belongs to.
    pub version: String,
    pub entries: HashMap<u32, u32>,
}

impl AliasTable {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, from: u32, to: u32) {
        self.entries.insert(from, to);
    }

    pub fn get(&self, id: u32) -> Option<u32> {
        self.entries.get(&id).copied()
    }

    /// Reads a table stored as a JSON object, such as `{"123": 456}`.
    #[cfg(feature = "serde")]
    pub fn from_json(version: &str, buffer: ByteSpan) -> Result<AliasTable, BankError> {
        let entries = serde_json::from_slice(buffer).map_err(|err| {
            BankError::InvalidAliasTable {
                message: err.to_string(),
            }
        })?;

        Ok(AliasTable {
            version: version.to_string(),
            entries,
        })
    }

    /// Writes the table back out as JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, BankError> {
        // sorted, so the output is stable
        let sorted: std::collections::BTreeMap<_, _> = self.entries.iter().collect();
        serde_json::to_string_pretty(&sorted).map_err(|err| BankError::InvalidAliasTable {
            message: err.to_string(),
        })
    }
}

/// Turns event ids back into the names they were hashed from.
#[derive(Debug, Clone)]
pub struct EventNameResolver<'a> {
    names: HashMap<u32, String>,
    aliases: Option<&'a AliasTable>,
}

impl<'a> EventNameResolver<'a> {
    /// Hashes every known name. If two names collide, the later one wins.
    pub fn new<I, S>(known_names: I, aliases: Option<&'a AliasTable>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names = HashMap::new();
        for name in known_names {
            let name = name.as_ref();
            let hash = hash_name(name);

            if let Some(previous) = names.insert(hash, name.to_string()) {
                if previous != name {
                    debug!(hash, previous = %previous, name, "Event name hash collision");
                }
            }
        }

        Self { names, aliases }
    }

    /// Number of distinct hashes known.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Looks up the name for `id`, following the alias table if there's no direct match.
    pub fn lookup(&self, id: u32) -> Option<&str> {
        let mut current = id;
        let mut visited = HashSet::new();

        loop {
            if let Some(name) = self.names.get(&current) {
                return Some(name.as_str());
            }

            if !visited.insert(current) {
                warn!(id, current, "Alias chain loops back on itself");
                return None;
            }

            current = self.aliases?.get(current)?;
        }
    }

    /// Like [`Self::lookup`], but falls back to the id itself.
    pub fn resolve(&self, id: u32) -> String {
        match self.lookup(id) {
            Some(name) => name.to_string(),
            None => {
                warn!(id, "Unknown event id");
                id.to_string()
            }
        }
    }
}

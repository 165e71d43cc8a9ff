// ABOUTME: Scratch - the side-channel accumulator shared across sequential
// ABOUTME: tool invocations in one agent session, with single-writer keys.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::ScratchError;

/// Session-scoped key/value side channel.
///
/// Values are kept out of the visible conversation. Any tool may read any key.
/// Writes go through [`Scratch::publish`]: the first tool to publish a key
/// becomes its owner and later writes from other tools are rejected. Keys
/// seeded by the caller have no owner until a tool first publishes them.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    entries: Map<String, Value>,
    owners: HashMap<String, String>,
}

impl Scratch {
    /// Create an empty scratch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a scratch with caller-provided entries.
    pub fn from_map(entries: Map<String, Value>) -> Self {
        Self {
            entries,
            owners: HashMap::new(),
        }
    }

    /// Read a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The tool that owns a key, if one has published it.
    pub fn owner(&self, key: &str) -> Option<&str> {
        self.owners.get(key).map(String::as_str)
    }

    /// Write a value on behalf of `writer`.
    pub fn publish(
        &mut self,
        writer: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Result<(), ScratchError> {
        let key = key.into();
        match self.owners.get(&key) {
            Some(owner) if owner != writer => {
                return Err(ScratchError::KeyOwned {
                    key,
                    owner: owner.clone(),
                    writer: writer.to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.owners.insert(key.clone(), writer.to_string());
            }
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow all entries.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Consume the scratch, returning its entries.
    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }
}

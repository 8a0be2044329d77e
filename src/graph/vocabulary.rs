use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use crate::error::{GraphError, Result};

/// Ordered name -> id mapping.
///
/// Ids are dense in `[0, len)` and follow insertion order, so the position
/// of a name in the underlying map is also its id. Used for both the entity
/// and the relation vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    ids: IndexMap<String, u32>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `name`, assigning the next free id on first sight
    pub fn get_or_insert(&mut self, name: &str) -> Result<u32> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }

        let id = u32::try_from(self.ids.len())
            .map_err(|_| GraphError::graph_construction("vocabulary exceeds u32 id space"))?;
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Reverse lookup
    pub fn name(&self, id: u32) -> Option<&str> {
        self.ids.get_index(id as usize).map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ids = IndexMap::new();
        for name in iter {
            let next = ids.len() as u32;
            ids.entry(name.as_ref().to_string()).or_insert(next);
        }
        Self { ids }
    }
}

//! Link group registry: group id -> composition rules

use crate::core::link::LinkGroup;
use indexmap::IndexMap;

/// Read-only lookup table of link groups
///
/// Group ids usually name a resource type or a view (`root`, `car`,
/// `readCar`), so that a handler can ask for "the links of a car".
#[derive(Debug, Clone, Default)]
pub struct LinkGroupRegistry {
    groups: IndexMap<String, LinkGroup>,
}

impl LinkGroupRegistry {
    pub fn new(groups: IndexMap<String, LinkGroup>) -> Self {
        Self { groups }
    }

    pub fn get(&self, group_id: &str) -> Option<&LinkGroup> {
        self.groups.get(group_id)
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    /// Group ids in definition order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkGroup)> {
        self.groups.iter().map(|(id, group)| (id.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, LinkGroup)> for LinkGroupRegistry {
    fn from_iter<I: IntoIterator<Item = (K, LinkGroup)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(id, group)| (id.into(), group)).collect())
    }
}

//! Link catalog: link id -> link metadata

use crate::core::link::Link;
use indexmap::IndexMap;

/// Read-only lookup table of every link the service can offer
#[derive(Debug, Clone, Default)]
pub struct LinkCatalog {
    links: IndexMap<String, Link>,
}

impl LinkCatalog {
    pub fn new(links: IndexMap<String, Link>) -> Self {
        Self { links }
    }

    pub fn get(&self, link_id: &str) -> Option<&Link> {
        self.links.get(link_id)
    }

    pub fn contains(&self, link_id: &str) -> bool {
        self.links.contains_key(link_id)
    }

    /// Link ids in definition order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(id, link)| (id.as_str(), link))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Link)> for LinkCatalog {
    fn from_iter<I: IntoIterator<Item = (K, Link)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(id, link)| (id.into(), link)).collect())
    }
}

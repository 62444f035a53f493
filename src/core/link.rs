//! Hypermedia link data model
//!
//! A [`Link`] is a catalog entry: the href template and metadata shared by
//! every context that offers the link. A [`LinkGroup`] describes which links
//! accompany one kind of resource, and a [`ResolvedLink`] is what ends up in
//! an API response once a group has been compiled.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Known URI template variables, by name
pub type Params = IndexMap<String, String>;

fn default_method() -> String {
    "GET".to_string()
}

/// Metadata for one link in the catalog
///
/// The catalog key is the link id; it is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// URI template, e.g. `/car/{carId}`
    pub href: String,

    /// Default relation type
    pub rel: String,

    /// Human readable description
    #[serde(default)]
    pub description: String,

    /// HTTP method, uppercase
    #[serde(default = "default_method")]
    pub method: String,

    /// Media types returned by the target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<String>,

    /// Media types accepted by the target
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepts: Vec<String>,
}

impl Link {
    /// Create a GET link with no description or media types
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            description: String::new(),
            method: default_method(),
            returns: Vec::new(),
            accepts: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_uppercase();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_returns(mut self, returns: Vec<String>) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_accepts(mut self, accepts: Vec<String>) -> Self {
        self.accepts = accepts;
        self
    }
}

/// A link as it is embedded in an API response
///
/// Every compilation produces fresh values, so callers may mutate them freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub id: String,

    /// Fully expanded URL
    pub href: String,

    pub rel: String,

    pub description: String,

    pub method: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepts: Vec<String>,
}

impl ResolvedLink {
    /// Copy a catalog entry under the given id, href still unexpanded
    pub fn from_catalog(id: impl Into<String>, link: &Link) -> Self {
        Self {
            id: id.into(),
            href: link.href.clone(),
            rel: link.rel.clone(),
            description: link.description.clone(),
            method: link.method.clone(),
            returns: link.returns.clone(),
            accepts: link.accepts.clone(),
        }
    }
}

/// Reference from a link group to a catalog link
///
/// In link data files this is either a bare id (`cars`) or an object that
/// reuses the link but changes its relation or description for this context:
///
/// ```yaml
/// - cars
/// - id: cars
///   rel: parent
///   description: Go to collection of cars
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkRef {
    Plain(String),
    Override {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rel: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl LinkRef {
    /// Reference a link under a different relation type
    pub fn with_rel(id: impl Into<String>, rel: impl Into<String>) -> Self {
        LinkRef::Override {
            id: id.into(),
            rel: Some(rel.into()),
            description: None,
        }
    }

    /// Id of the referenced catalog link
    pub fn id(&self) -> &str {
        match self {
            LinkRef::Plain(id) => id,
            LinkRef::Override { id, .. } => id,
        }
    }
}

impl From<&str> for LinkRef {
    fn from(id: &str) -> Self {
        LinkRef::Plain(id.to_string())
    }
}

impl From<String> for LinkRef {
    fn from(id: String) -> Self {
        LinkRef::Plain(id)
    }
}

/// A group that delegates entirely to another group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupAlias {
    pub clone: String,
}

/// Composition rules of a link group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupRules {
    /// Always included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<LinkRef>,

    /// Included whenever the group is compiled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<LinkRef>,

    /// Included only when this group is compiled directly, never through a mixin
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive: Vec<LinkRef>,

    /// Groups whose required and optional links are merged in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixin: Vec<String>,

    /// Template variables known in this context, with example values for
    /// the documentation pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl GroupRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRef>,
    {
        self.required = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn optional<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRef>,
    {
        self.optional = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclusive<I, R>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<LinkRef>,
    {
        self.exclusive = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn mixin<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mixin = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = Some(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

/// A link group, keyed in the registry by a semantic context such as a
/// resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkGroup {
    /// `{clone: other}`: compile `other` instead
    Alias(GroupAlias),
    /// `{required, optional, exclusive, mixin, params}`
    Composite(GroupRules),
}

impl LinkGroup {
    pub fn clone_of(target: impl Into<String>) -> Self {
        LinkGroup::Alias(GroupAlias {
            clone: target.into(),
        })
    }

    /// Every link reference of the group, across required, optional and
    /// exclusive
    pub fn link_refs(&self) -> impl Iterator<Item = &LinkRef> {
        let rules = match self {
            LinkGroup::Alias(_) => None,
            LinkGroup::Composite(rules) => Some(rules),
        };
        rules.into_iter().flat_map(|rules| {
            rules
                .required
                .iter()
                .chain(&rules.optional)
                .chain(&rules.exclusive)
        })
    }

    /// Groups this group depends on, through its clone target or mixins
    pub fn group_refs(&self) -> Vec<&str> {
        match self {
            LinkGroup::Alias(alias) => vec![alias.clone.as_str()],
            LinkGroup::Composite(rules) => rules.mixin.iter().map(String::as_str).collect(),
        }
    }
}

impl From<GroupRules> for LinkGroup {
    fn from(rules: GroupRules) -> Self {
        LinkGroup::Composite(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_defaults_from_yaml() {
        let yaml = r#"
            href: /car/{carId}
            rel: car
        "#;

        let link: Link = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(link.method, "GET");
        assert!(link.description.is_empty());
        assert!(link.returns.is_empty());
    }

    #[test]
    fn test_link_ref_plain_and_override() {
        let yaml = r#"
            - cars
            - id: cars
              rel: parent
        "#;

        let refs: Vec<LinkRef> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(refs[0], LinkRef::Plain("cars".to_string()));
        assert_eq!(refs[1], LinkRef::with_rel("cars", "parent"));
        assert_eq!(refs[1].id(), "cars");
    }

    #[test]
    fn test_group_variants() {
        let alias: LinkGroup = serde_yaml::from_str("clone: car").unwrap();
        assert_eq!(alias, LinkGroup::clone_of("car"));

        let empty: LinkGroup = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, LinkGroup::Composite(GroupRules::default()));

        let rules: LinkGroup = serde_yaml::from_str(
            r#"
            required: [car]
            optional: [{id: cars, rel: parent}]
            mixin: [cars]
            params:
              carId: "<carId>"
            "#,
        )
        .unwrap();
        let LinkGroup::Composite(rules) = rules else {
            panic!("expected composition rules");
        };
        assert_eq!(rules.required, vec![LinkRef::from("car")]);
        assert_eq!(rules.mixin, vec!["cars".to_string()]);
        assert_eq!(rules.params.unwrap()["carId"], "<carId>");
    }

    #[test]
    fn test_clone_cannot_be_mixed_with_rules() {
        let result: Result<LinkGroup, _> = serde_yaml::from_str("{clone: car, required: [car]}");
        assert!(result.is_err());
    }

    #[test]
    fn test_link_refs_and_group_refs() {
        let group: LinkGroup = GroupRules::new()
            .required(["a"])
            .optional(["b"])
            .exclusive(["c"])
            .mixin(["other"])
            .into();

        let ids: Vec<_> = group.link_refs().map(LinkRef::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(group.group_refs(), vec!["other"]);
        assert_eq!(LinkGroup::clone_of("x").group_refs(), vec!["x"]);
    }
}

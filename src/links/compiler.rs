//! Group compilation: from a link group id to the links of a response
//!
//! A group contributes, in order, its required links, its optional links,
//! its exclusive links (only when it is the group being compiled, never when
//! it is mixed into another one) and finally the links of its mixins. The
//! result is deduplicated on `(id, rel)` and the link carrying the group's own
//! id becomes `self`.
//!
//! Exclusive links let a parent resource be mixed into its children without
//! dragging its navigational links (collection root, search forms) along.

use crate::core::error::LinkError;
use crate::core::link::{LinkGroup, LinkRef, Params, ResolvedLink};
use crate::core::template::UriTemplate;
use crate::links::catalog::LinkCatalog;
use crate::links::registry::LinkGroupRegistry;
use std::collections::HashMap;

/// Relation given to the link that points at the compiled group itself
pub const SELF_REL: &str = "self";

/// Compiles link groups against a catalog
///
/// Holds only shared references, so a compiler is cheap to create per
/// request. Compilation assumes link data that passed
/// [`validate`](crate::links::validator::validate): a clone/mixin cycle would
/// not terminate.
#[derive(Debug, Clone, Copy)]
pub struct GroupCompiler<'a> {
    catalog: &'a LinkCatalog,
    registry: &'a LinkGroupRegistry,
}

impl<'a> GroupCompiler<'a> {
    pub(crate) fn new(catalog: &'a LinkCatalog, registry: &'a LinkGroupRegistry) -> Self {
        Self { catalog, registry }
    }

    /// Compile the links of a group
    ///
    /// # Arguments
    /// * `group_id` - Group to compile
    /// * `params` - Known URI template variables
    /// * `include_exclusives` - Whether the group's exclusive links are added
    /// * `use_group_params` - Replace `params` with the group's own example
    ///   params when it defines some (documentation pages)
    pub fn compile(
        &self,
        group_id: &str,
        params: &Params,
        include_exclusives: bool,
        use_group_params: bool,
    ) -> Result<Vec<ResolvedLink>, LinkError> {
        let group = self
            .registry
            .get(group_id)
            .ok_or_else(|| LinkError::UnknownGroup {
                group_id: group_id.to_string(),
            })?;

        let rules = match group {
            LinkGroup::Alias(alias) => {
                return self.compile(&alias.clone, params, include_exclusives, use_group_params);
            }
            LinkGroup::Composite(rules) => rules,
        };

        // The group's params replace the caller's, they are not merged
        let params = match (&rules.params, use_group_params) {
            (Some(own), true) => own,
            _ => params,
        };

        let mut result = Vec::new();
        for link_ref in rules.required.iter().chain(&rules.optional) {
            result.push(self.resolve_link(link_ref, params)?);
        }
        if include_exclusives {
            for link_ref in &rules.exclusive {
                result.push(self.resolve_link(link_ref, params)?);
            }
        }
        for mixin in &rules.mixin {
            result.extend(self.compile(mixin, params, false, use_group_params)?);
        }

        // Marking can make two entries identical, hence the second pass
        let result = dedup(mark_self(dedup(result), group_id));
        tracing::debug!(
            link_group_id = %group_id,
            count = result.len(),
            include_exclusives,
            "Compiled link group"
        );
        Ok(result)
    }

    /// Copy the catalog link behind a reference, apply its overrides and
    /// expand its href
    pub fn resolve_link(&self, link_ref: &LinkRef, params: &Params) -> Result<ResolvedLink, LinkError> {
        let link_id = link_ref.id();
        let link = self
            .catalog
            .get(link_id)
            .ok_or_else(|| LinkError::UnknownLink {
                link_id: link_id.to_string(),
            })?;

        let mut resolved = ResolvedLink::from_catalog(link_id, link);
        if let LinkRef::Override { rel, description, .. } = link_ref {
            if let Some(rel) = rel {
                resolved.rel = rel.clone();
            }
            if let Some(description) = description {
                resolved.description = description.clone();
            }
        }
        resolved.href = UriTemplate::parse(&link.href)?.expand(params);
        Ok(resolved)
    }
}

/// Keep the first link of every `(id, rel)` pair, in order
///
/// The same link may appear several times under different relations.
fn dedup(links: Vec<ResolvedLink>) -> Vec<ResolvedLink> {
    let mut seen: HashMap<String, Vec<String>> = HashMap::new();
    links
        .into_iter()
        .filter(|link| {
            let rels = seen.entry(link.id.clone()).or_default();
            if rels.contains(&link.rel) {
                false
            } else {
                rels.push(link.rel.clone());
                true
            }
        })
        .collect()
}

fn mark_self(mut links: Vec<ResolvedLink>, group_id: &str) -> Vec<ResolvedLink> {
    for link in links.iter_mut().filter(|link| link.id == group_id) {
        link.rel = SELF_REL.to_string();
    }
    links
}

//! Cross-reference checks between the link catalog and the group registry
//!
//! Broken link data is a deployment bug, so it is reported once at startup
//! instead of on the first request that happens to hit it.

use crate::core::error::ConfigError;
use crate::core::link::LinkGroup;
use crate::core::template::UriTemplate;
use crate::links::catalog::LinkCatalog;
use crate::links::registry::LinkGroupRegistry;
use std::collections::{HashMap, HashSet};

/// Validate link data, stopping at the first problem found
///
/// Checks, in order:
/// 1. every catalog link is owned by a group, either because a group
///    references it or because a group carries the same id;
/// 2. every link reference and clone target of every group exists in the
///    catalog;
/// 3. every clone target and mixin is a registered group;
/// 4. every href parses as a URI template;
/// 5. clone and mixin references do not form a cycle.
pub fn validate(catalog: &LinkCatalog, registry: &LinkGroupRegistry) -> Result<(), ConfigError> {
    let result = check(catalog, registry);
    if let Err(err) = &result {
        tracing::error!(error = %err, "Invalid link data");
    }
    result
}

fn check(catalog: &LinkCatalog, registry: &LinkGroupRegistry) -> Result<(), ConfigError> {
    let referenced: HashSet<&str> = registry
        .iter()
        .flat_map(|(_, group)| group.link_refs().map(|r| r.id()))
        .collect();
    for link_id in catalog.ids() {
        if !referenced.contains(link_id) && !registry.contains(link_id) {
            return Err(ConfigError::MissingLinkGroup {
                link_id: link_id.to_string(),
            });
        }
    }

    for (group_id, group) in registry.iter() {
        for link_ref in group.link_refs() {
            if !catalog.contains(link_ref.id()) {
                return Err(ConfigError::MissingLinkId {
                    group_id: group_id.to_string(),
                    link_id: link_ref.id().to_string(),
                });
            }
        }

        match group {
            LinkGroup::Alias(alias) => {
                // A clone names both the group it copies and that group's link
                if !catalog.contains(&alias.clone) {
                    return Err(ConfigError::MissingLinkId {
                        group_id: group_id.to_string(),
                        link_id: alias.clone.clone(),
                    });
                }
                if !registry.contains(&alias.clone) {
                    return Err(ConfigError::MissingCloneTarget {
                        group_id: group_id.to_string(),
                        target: alias.clone.clone(),
                    });
                }
            }
            LinkGroup::Composite(rules) => {
                if let Some(mixin) = rules.mixin.iter().find(|m| !registry.contains(m)) {
                    return Err(ConfigError::MissingMixinGroup {
                        group_id: group_id.to_string(),
                        mixin: mixin.clone(),
                    });
                }
            }
        }
    }

    for (link_id, link) in catalog.iter() {
        UriTemplate::parse(&link.href).map_err(|e| ConfigError::InvalidTemplate {
            link_id: link_id.to_string(),
            message: e.to_string(),
        })?;
    }

    check_cycles(registry)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn check_cycles(registry: &LinkGroupRegistry) -> Result<(), ConfigError> {
    let mut state: HashMap<&str, Visit> = HashMap::new();
    for group_id in registry.ids() {
        visit(registry, group_id, &mut state)?;
    }
    Ok(())
}

fn visit<'a>(
    registry: &'a LinkGroupRegistry,
    group_id: &'a str,
    state: &mut HashMap<&'a str, Visit>,
) -> Result<(), ConfigError> {
    match state.get(group_id) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            return Err(ConfigError::CircularGroup {
                group_id: group_id.to_string(),
            });
        }
        None => {}
    }

    state.insert(group_id, Visit::InProgress);
    if let Some(group) = registry.get(group_id) {
        for next in group.group_refs() {
            visit(registry, next, state)?;
        }
    }
    state.insert(group_id, Visit::Done);
    Ok(())
}

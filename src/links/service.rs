//! The `Links` facade: validated link data plus the operations API handlers
//! and documentation pages need

use crate::config::LinkDataConfig;
use crate::core::error::{ConfigError, LinkError, RelMapResult};
use crate::core::link::{Params, ResolvedLink};
use crate::links::catalog::LinkCatalog;
use crate::links::compiler::GroupCompiler;
use crate::links::docs::{DocGroup, DocLink, RelMapPage, RelMapRenderer, doc_href};
use crate::links::registry::LinkGroupRegistry;
use crate::links::validator::validate;
use std::sync::Arc;

/// Group shown when no group id is given
pub const ROOT_GROUP: &str = "root";

struct Inner {
    catalog: LinkCatalog,
    registry: LinkGroupRegistry,
    renderer: RelMapRenderer,
}

/// Central access point for hypermedia links
///
/// Built once at startup from the link catalog and the group registry. A
/// `Links` value only exists for link data that passed validation, and it
/// is never mutated afterwards, so clones can be shared freely between
/// request handlers.
///
/// # Example
///
/// ```rust,ignore
/// let links = Links::from_config(LinkDataConfig::default_config())?;
/// let root_links = links.get_links("root")?;
/// ```
#[derive(Clone)]
pub struct Links {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Links {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Links")
            .field("links", &self.inner.catalog.len())
            .field("groups", &self.inner.registry.len())
            .finish()
    }
}

impl Links {
    /// Validate link data and make it available for compilation
    pub fn new(catalog: LinkCatalog, registry: LinkGroupRegistry) -> Result<Self, ConfigError> {
        validate(&catalog, &registry)?;
        let renderer = RelMapRenderer::new()?;

        tracing::info!(
            links = catalog.len(),
            groups = registry.len(),
            "Loaded link data"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                catalog,
                registry,
                renderer,
            }),
        })
    }

    pub fn from_config(config: LinkDataConfig) -> Result<Self, ConfigError> {
        Self::new(LinkCatalog::new(config.links), LinkGroupRegistry::new(config.groups))
    }

    pub fn catalog(&self) -> &LinkCatalog {
        &self.inner.catalog
    }

    pub fn registry(&self) -> &LinkGroupRegistry {
        &self.inner.registry
    }

    /// Compiler over this link data
    pub fn compiler(&self) -> GroupCompiler<'_> {
        GroupCompiler::new(&self.inner.catalog, &self.inner.registry)
    }

    /// See [`GroupCompiler::compile`]
    pub fn compile(
        &self,
        group_id: &str,
        params: &Params,
        include_exclusives: bool,
        use_group_params: bool,
    ) -> Result<Vec<ResolvedLink>, LinkError> {
        self.compiler()
            .compile(group_id, params, include_exclusives, use_group_params)
    }

    /// Links to embed in a response for a group, with no known params
    pub fn get_links(&self, group_id: &str) -> Result<Vec<ResolvedLink>, LinkError> {
        self.get_links_with(group_id, &Params::new())
    }

    /// Links to embed in a response for a group
    pub fn get_links_with(&self, group_id: &str, params: &Params) -> Result<Vec<ResolvedLink>, LinkError> {
        self.compile(group_id, params, true, false)
    }

    /// Data of the documentation page of a group
    ///
    /// Hrefs are expanded with the group's own example params.
    pub fn document(&self, group_id: &str, doc_root: &str) -> Result<RelMapPage, LinkError> {
        let links = self
            .compile(group_id, &Params::new(), true, true)?
            .into_iter()
            .map(|link| {
                let doc_href = self
                    .inner
                    .registry
                    .contains(&link.id)
                    .then(|| doc_href(doc_root, &link.id));
                DocLink::new(link, doc_href)
            })
            .collect();

        let groups = self
            .inner
            .registry
            .ids()
            .map(|id| DocGroup {
                id: id.to_string(),
                href: doc_href(doc_root, id),
            })
            .collect();

        Ok(RelMapPage {
            link_group_id: group_id.to_string(),
            doc_root: doc_root.to_string(),
            links,
            groups,
        })
    }

    /// Render the documentation page of a group to HTML
    pub fn render_documentation(&self, group_id: &str, doc_root: &str) -> RelMapResult<String> {
        let page = self.document(group_id, doc_root)?;
        self.inner.renderer.render(&page)
    }
}

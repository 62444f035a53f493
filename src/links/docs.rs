//! Human readable link documentation ("relation map")
//!
//! A documentation page shows the compiled links of one group, expanded with
//! the group's example params, plus a navigation list of every group.

use crate::core::error::{ConfigError, RelMapResult};
use crate::core::link::ResolvedLink;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "relMap.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{{ link_group_id }} - link documentation</title>
  <style>
    body { font-family: sans-serif; margin: 2em; }
    table { border-collapse: collapse; }
    th, td { border: 1px solid #ccc; padding: 0.3em 0.6em; text-align: left; vertical-align: top; }
    code { white-space: nowrap; }
  </style>
</head>
<body>
  <h1>Link group <code>{{ link_group_id }}</code></h1>
  <table>
    <thead>
      <tr><th>rel</th><th>method</th><th>href</th><th>description</th><th>returns</th><th>accepts</th></tr>
    </thead>
    <tbody>
{%- for link in links %}
      <tr id="{{ link.id }}">
        <td>{% if link.doc_href %}<a href="{{ link.doc_href }}">{{ link.rel }}</a>{% else %}{{ link.rel }}{% endif %}</td>
        <td>{{ link.method }}</td>
        <td><code>{{ link.href }}</code></td>
        <td>{{ link.description }}</td>
        <td>{% for media_type in link.returns %}<code>{{ media_type }}</code><br>{% endfor %}</td>
        <td>{% for media_type in link.accepts %}<code>{{ media_type }}</code><br>{% endfor %}</td>
      </tr>
{%- else %}
      <tr><td colspan="6">No links</td></tr>
{%- endfor %}
    </tbody>
  </table>
  <h2>Link groups</h2>
  <ul>
{%- for group in groups %}
    <li>{% if group.id == link_group_id %}<strong>{{ group.id }}</strong>{% else %}<a href="{{ group.href }}">{{ group.id }}</a>{% endif %}</li>
{%- endfor %}
  </ul>
</body>
</html>
"#;

/// A link as listed on a documentation page
///
/// Unlike [`ResolvedLink`], every field is always present in the template
/// context, empty media type lists included.
#[derive(Debug, Clone, Serialize)]
pub struct DocLink {
    pub id: String,
    pub href: String,
    pub rel: String,
    pub description: String,
    pub method: String,
    pub returns: Vec<String>,
    pub accepts: Vec<String>,

    /// Documentation page of the group sharing this link's id, if any
    pub doc_href: Option<String>,
}

impl DocLink {
    pub fn new(link: ResolvedLink, doc_href: Option<String>) -> Self {
        Self {
            id: link.id,
            href: link.href,
            rel: link.rel,
            description: link.description,
            method: link.method,
            returns: link.returns,
            accepts: link.accepts,
            doc_href,
        }
    }
}

/// Navigation entry for one link group
#[derive(Debug, Clone, Serialize)]
pub struct DocGroup {
    pub id: String,
    pub href: String,
}

/// Everything a documentation page shows
#[derive(Debug, Clone, Serialize)]
pub struct RelMapPage {
    pub link_group_id: String,
    pub doc_root: String,
    pub links: Vec<DocLink>,
    pub groups: Vec<DocGroup>,
}

/// Documentation page of a group below a documentation prefix
pub fn doc_href(doc_root: &str, group_id: &str) -> String {
    format!("{}/{}", doc_root.trim_end_matches('/'), group_id)
}

/// Renders [`RelMapPage`]s to HTML
#[derive(Debug, Clone)]
pub struct RelMapRenderer {
    tera: Tera,
}

impl RelMapRenderer {
    pub fn new() -> Result<Self, ConfigError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| ConfigError::Template {
                message: e.to_string(),
            })?;
        Ok(Self { tera })
    }

    pub fn render(&self, page: &RelMapPage) -> RelMapResult<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> RelMapPage {
        RelMapPage {
            link_group_id: "root".to_string(),
            doc_root: "/relMap".to_string(),
            links: vec![DocLink::new(
                ResolvedLink {
                    id: "ui".to_string(),
                    href: "/ui".to_string(),
                    rel: "ui".to_string(),
                    description: "View <b>UI</b>".to_string(),
                    method: "GET".to_string(),
                    returns: vec!["text/html".to_string()],
                    accepts: vec![],
                },
                None,
            )],
            groups: vec![
                DocGroup {
                    id: "root".to_string(),
                    href: doc_href("/relMap", "root"),
                },
                DocGroup {
                    id: "car".to_string(),
                    href: doc_href("/relMap", "car"),
                },
            ],
        }
    }

    #[test]
    fn test_doc_href() {
        assert_eq!(doc_href("/relMap", "car"), "/relMap/car");
        assert_eq!(doc_href("/", "car"), "/car");
    }

    #[test]
    fn test_render_page() {
        let renderer = RelMapRenderer::new().unwrap();
        let html = renderer.render(&page()).unwrap();

        assert!(html.contains("Link group <code>root</code>"));
        assert!(html.contains("<strong>root</strong>"));
        assert!(html.contains("<tr id=\"ui\">"));
        assert!(html.contains(">car</a>"));
    }

    #[test]
    fn test_render_escapes_descriptions() {
        let renderer = RelMapRenderer::new().unwrap();
        let html = renderer.render(&page()).unwrap();

        assert!(html.contains("View &lt;b&gt;UI"));
        assert!(!html.contains("<b>UI</b>"));
    }

    #[test]
    fn test_render_link_without_media_types() {
        let renderer = RelMapRenderer::new().unwrap();
        let mut page = page();
        page.links[0].returns.clear();
        page.links[0].doc_href = Some(doc_href("/relMap", "ui"));

        let html = renderer.render(&page).unwrap();
        assert!(html.contains(">ui</a>"));
        assert!(!html.contains("<code>text"));
    }

    #[test]
    fn test_render_empty_group() {
        let renderer = RelMapRenderer::new().unwrap();
        let mut page = page();
        page.links.clear();

        let html = renderer.render(&page).unwrap();
        assert!(html.contains("No links"));
    }
}

//! URI template expansion (RFC 6570) for link hrefs
//!
//! Variables are plain strings, so list and map values are not supported and
//! the explode modifier is accepted but has no effect. Undefined variables are
//! dropped from the expansion instead of raising an error.
//!
//! ```rust,ignore
//! let template = UriTemplate::parse("/car/{carId}{?fields}")?;
//! assert_eq!(template.expand(&params), "/car/42?fields=name");
//! ```

use crate::core::error::LinkError;
use crate::core::link::Params;
use regex::Regex;
use std::sync::OnceLock;

/// Characters RFC 3986 reserves as delimiters
const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

fn expression_regex() -> &'static Regex {
    static EXPRESSION: OnceLock<Regex> = OnceLock::new();
    EXPRESSION.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("valid expression pattern"))
}

fn varspec_regex() -> &'static Regex {
    static VARSPEC: OnceLock<Regex> = OnceLock::new();
    VARSPEC.get_or_init(|| {
        Regex::new(r"^((?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2})(?:\.?(?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2}))*)(?::([1-9][0-9]{0,3})|(\*))?$")
            .expect("valid varspec pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    Path,
    PathParam,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::Path),
            ';' => Some(Operator::PathParam),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    fn first(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::Path => "/",
            Operator::PathParam => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::Path => "/",
            Operator::PathParam => ";",
            Operator::Query | Operator::QueryContinuation => "&",
        }
    }

    fn named(self) -> bool {
        matches!(
            self,
            Operator::PathParam | Operator::Query | Operator::QueryContinuation
        )
    }

    /// Suffix for a named variable whose value is empty
    fn if_empty(self) -> &'static str {
        match self {
            Operator::Query | Operator::QueryContinuation => "=",
            _ => "",
        }
    }

    fn allows_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VarSpec {
    name: String,
    prefix: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression {
        operator: Operator,
        vars: Vec<VarSpec>,
    },
}

/// A parsed URI template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    /// Parse a template, rejecting unterminated braces and malformed
    /// expressions
    pub fn parse(template: &str) -> Result<Self, LinkError> {
        let invalid = |message: String| LinkError::InvalidTemplate {
            template: template.to_string(),
            message,
        };

        let mut parts = Vec::new();
        let mut last = 0;
        for captures in expression_regex().captures_iter(template) {
            let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            push_literal(&mut parts, &template[last..whole.start()]).map_err(&invalid)?;
            parts.push(parse_expression(body.as_str()).map_err(&invalid)?);
            last = whole.end();
        }
        push_literal(&mut parts, &template[last..]).map_err(&invalid)?;

        Ok(Self {
            source: template.to_string(),
            parts,
        })
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of every variable the template uses, in order of appearance
    pub fn variables(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Expression { vars, .. } => Some(vars),
                Part::Literal(_) => None,
            })
            .flatten()
            .map(|var| var.name.as_str())
            .collect()
    }

    /// Expand the template with the given variables
    ///
    /// A trailing path segment left empty by an undefined variable is dropped
    /// along with its slash, so `/car/{carId}` expands to `/car` without
    /// `carId`. Inner segments stay empty: `/car/{carId}/parts` gives
    /// `/car//parts`.
    pub fn expand(&self, params: &Params) -> String {
        let mut out = String::with_capacity(self.source.len());
        for (i, part) in self.parts.iter().enumerate() {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Expression { operator, vars } => {
                    let expanded = expand_expression(*operator, vars, params);
                    if expanded.is_empty() {
                        let next = self.parts.get(i + 1);
                        if ends_path(next) && out.len() > 1 && out.ends_with('/') {
                            out.pop();
                        }
                    }
                    out.push_str(&expanded);
                }
            }
        }
        out
    }
}

impl std::fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(parts: &mut Vec<Part>, text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Ok(());
    }
    if let Some(c) = text.chars().find(|c| *c == '{' || *c == '}') {
        return Err(format!("unmatched '{}'", c));
    }
    parts.push(Part::Literal(text.to_string()));
    Ok(())
}

fn parse_expression(body: &str) -> Result<Part, String> {
    let mut chars = body.chars();
    let operator = match chars.next() {
        None => return Err("empty expression".to_string()),
        Some(c) => Operator::from_char(c),
    };
    let list = match operator {
        Some(_) => chars.as_str(),
        None => body,
    };

    let mut vars = Vec::new();
    for spec in list.split(',') {
        let captures = varspec_regex()
            .captures(spec)
            .ok_or_else(|| format!("invalid variable '{}'", spec))?;
        let prefix = match captures.get(2) {
            Some(max) => Some(
                max.as_str()
                    .parse()
                    .map_err(|_| format!("invalid prefix in '{}'", spec))?,
            ),
            None => None,
        };
        vars.push(VarSpec {
            name: captures[1].to_string(),
            prefix,
        });
    }

    Ok(Part::Expression {
        operator: operator.unwrap_or(Operator::Simple),
        vars,
    })
}

fn expand_expression(operator: Operator, vars: &[VarSpec], params: &Params) -> String {
    let expanded: Vec<String> = vars
        .iter()
        .filter_map(|var| {
            let value = params.get(&var.name)?;
            let value = match var.prefix {
                Some(max) => value.chars().take(max).collect::<String>(),
                None => value.clone(),
            };
            let encoded = encode(&value, operator.allows_reserved());
            Some(if !operator.named() {
                encoded
            } else if encoded.is_empty() {
                format!("{}{}", var.name, operator.if_empty())
            } else {
                format!("{}={}", var.name, encoded)
            })
        })
        .collect();

    if expanded.is_empty() {
        return String::new();
    }
    format!("{}{}", operator.first(), expanded.join(operator.separator()))
}

/// Whether the part following an empty expansion ends the path: the end of
/// the template, a query or a fragment
///
/// A following path literal keeps the slash, so `/car/{carId}/parts` does
/// not collapse into `/car/parts`.
fn ends_path(next: Option<&Part>) -> bool {
    match next {
        None => true,
        Some(Part::Literal(text)) => text.starts_with(['?', '#']),
        Some(Part::Expression { operator, .. }) => matches!(
            operator,
            Operator::Query | Operator::QueryContinuation | Operator::Fragment
        ),
    }
}

fn encode(value: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return urlencoding::encode(value).into_owned();
    }

    let mut out = String::with_capacity(value.len());
    let bytes = value.as_bytes();
    let mut buf = [0u8; 4];
    for (i, c) in value.char_indices() {
        let keep = c.is_ascii_alphanumeric()
            || "-._~".contains(c)
            || RESERVED.contains(c)
            || (c == '%'
                && bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit());
        if keep {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn expand(template: &str, pairs: &[(&str, &str)]) -> String {
        UriTemplate::parse(template).unwrap().expand(&params(pairs))
    }

    #[test]
    fn test_simple_expansion() {
        assert_eq!(expand("/car/{carId}", &[("carId", "42")]), "/car/42");
        assert_eq!(expand("/", &[]), "/");
    }

    #[test]
    fn test_missing_variable_is_omitted() {
        assert_eq!(expand("/car/{carId}", &[]), "/car");
        assert_eq!(expand("/cars{?make,model}", &[]), "/cars");
        assert_eq!(expand("/car/{carId}?full", &[]), "/car?full");
        assert_eq!(expand("/car/{carId}{?fields}", &[]), "/car");
    }

    #[test]
    fn test_missing_inner_segment_keeps_slashes() {
        assert_eq!(expand("/car/{carId}/parts", &[]), "/car//parts");
        assert_eq!(expand("/car/{carId}/parts", &[("carId", "7")]), "/car/7/parts");
    }

    #[test]
    fn test_simple_expansion_encodes_reserved() {
        assert_eq!(
            expand("/search/{q}", &[("q", "Hello World!")]),
            "/search/Hello%20World%21"
        );
    }

    #[test]
    fn test_reserved_and_fragment() {
        assert_eq!(expand("{+path}/here", &[("path", "/foo/bar")]), "/foo/bar/here");
        assert_eq!(expand("/x{#frag}", &[("frag", "a b")]), "/x#a%20b");
        assert_eq!(expand("{+p}", &[("p", "50%25")]), "50%25");
    }

    #[test]
    fn test_query_operators() {
        assert_eq!(
            expand("/cars{?make,model}", &[("make", "vw"), ("model", "")]),
            "/cars?make=vw&model="
        );
        assert_eq!(
            expand("/cars?limit=10{&offset}", &[("offset", "20")]),
            "/cars?limit=10&offset=20"
        );
    }

    #[test]
    fn test_label_path_and_params() {
        assert_eq!(expand("/file{.ext}", &[("ext", "json")]), "/file.json");
        assert_eq!(
            expand("{/a,b}", &[("a", "cars"), ("b", "42")]),
            "/cars/42"
        );
        assert_eq!(expand("/m{;x,y}", &[("x", "1"), ("y", "")]), "/m;x=1;y");
    }

    #[test]
    fn test_prefix_modifier() {
        assert_eq!(expand("/{name:3}", &[("name", "abcdef")]), "/abc");
        assert_eq!(expand("/{name*}", &[("name", "abc")]), "/abc");
    }

    #[test]
    fn test_variables() {
        let template = UriTemplate::parse("/car/{carId}{?make,model}").unwrap();
        assert_eq!(template.variables(), vec!["carId", "make", "model"]);
        assert_eq!(template.to_string(), "/car/{carId}{?make,model}");
    }

    #[test]
    fn test_invalid_templates() {
        assert!(UriTemplate::parse("/car/{carId").is_err());
        assert!(UriTemplate::parse("/car/carId}").is_err());
        assert!(UriTemplate::parse("/car/{}").is_err());
        assert!(UriTemplate::parse("/car/{car id}").is_err());

        let err = UriTemplate::parse("/car/{").unwrap_err();
        assert!(matches!(err, LinkError::InvalidTemplate { .. }));
    }
}

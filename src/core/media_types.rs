//! Media types advertised in link `returns` and `accepts` lists

/// Prefix of the vendor JSON media type; the schema reference follows
pub const VENDOR_PREFIX: &str = "application/vnd.tz-api+json; schema=\"schemas.tzmedical.com/";

/// Vendor JSON media type for the given schema reference, e.g.
/// `empty-1.0.json#/definitions/empty`
pub fn vendor(schema: &str) -> String {
    format!("{}{}\"", VENDOR_PREFIX, schema)
}

/// Response without data
pub fn empty() -> Vec<String> {
    vec![vendor("empty-1.0.json#/definitions/empty")]
}

pub fn html() -> Vec<String> {
    vec!["text/html".to_string()]
}

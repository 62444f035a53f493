//! Integration tests for loading link data from YAML files

use relmap::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_link_data_file() {
    let file = write_yaml(
        r#"
links:
  cars:
    href: /cars{?make}
    rel: cars
    description: List cars
    returns: ['application/vnd.tz-api+json; schema="schemas.tzmedical.com/car-1.0.json#/definitions/cars"']
  createCar:
    href: /cars
    rel: create
    method: POST
groups:
  cars:
    required: [cars]
    optional:
      - id: createCar
        description: Register a car
"#,
    );

    let config = LinkDataConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.links.len(), 2);
    assert_eq!(config.links["cars"].method, "GET");
    assert_eq!(config.links["cars"].returns.len(), 1);

    let links = Links::from_config(config).unwrap();
    let cars = links.get_links("cars").unwrap();
    assert_eq!(cars[0].rel, "self");
    assert_eq!(cars[1].description, "Register a car");
}

#[test]
fn test_group_order_is_preserved() {
    let file = write_yaml(
        r#"
links:
  z: { href: /z, rel: z }
  a: { href: /a, rel: a }
  m: { href: /m, rel: m }
groups:
  z: { required: [z] }
  a: { required: [a] }
  m: { clone: z }
  all: { optional: [m, a, z] }
"#,
    );

    let config = LinkDataConfig::from_yaml_file(file.path()).unwrap();
    let ids: Vec<_> = config.groups.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["z", "a", "m", "all"]);

    let links = Links::from_config(config).unwrap();
    let all = links.get_links("all").unwrap();
    let ids: Vec<_> = all.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["m", "a", "z"]);
}

#[test]
fn test_missing_file() {
    let err = LinkDataConfig::from_yaml_file("/no/such/links.yaml").unwrap_err();
    assert_eq!(
        err,
        ConfigError::FileNotFound {
            path: "/no/such/links.yaml".to_string()
        }
    );
}

#[test]
fn test_parse_error_names_the_file() {
    let file = write_yaml("links: [not, a, map]\n");

    let err = LinkDataConfig::from_yaml_file(file.path()).unwrap_err();
    match &err {
        ConfigError::ParseError { file: Some(name), .. } => {
            assert_eq!(name, &file.path().display().to_string());
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_group_keys_are_rejected() {
    let yaml = r#"
links:
  a: { href: /a, rel: a }
groups:
  a:
    requried: [a]
"#;
    assert!(LinkDataConfig::from_yaml_str(yaml).is_err());
}

#[test]
fn test_app_config_loads_file() {
    let file = write_yaml(
        r#"
links:
  root: { href: /, rel: root }
groups:
  root: { exclusive: [root] }
"#,
    );
    let path = file.path().display().to_string();

    let config = AppConfig::from_lookup(|key| match key {
        "LINK_DATA_PATH" => Some(path.clone()),
        _ => None,
    })
    .unwrap();

    let data = config.load_link_data().unwrap();
    assert_eq!(data.links.len(), 1);
}

#[test]
fn test_app_config_defaults_to_builtin_data() {
    let config = AppConfig::from_lookup(|_| None).unwrap();
    let data = config.load_link_data().unwrap();

    assert_eq!(data, LinkDataConfig::default_config());
}

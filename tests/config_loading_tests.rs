//! Integration tests for configuration loading and merging

use prisma_provider::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
client:
  uri: https://prisma.example.com/app/dev
  headers:
    Authorization: Bearer abc
  timeout_secs: 10
debug: true
introspection:
  include: [User, Post]
"#,
    );

    let config = ProviderConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let client = config.client.unwrap();
    assert_eq!(client.uri, "https://prisma.example.com/app/dev");
    assert_eq!(client.timeout_secs, Some(10));
    assert!(config.debug);
    assert_eq!(
        config.introspection.include,
        Some(vec!["User".to_string(), "Post".to_string()])
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    assert!(ProviderConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let file = write_config("client: [unclosed\n");
    let err = ProviderConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();

    assert!(err.downcast_ref::<serde_yaml::Error>().is_some());
}

#[tokio::test]
async fn test_config_without_client_cannot_build_provider() {
    let config = ProviderConfig::from_yaml_str("debug: true\n").unwrap();
    let err = build_data_provider(config.into_options()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Config(ConfigError::MissingClient)));
}

#[tokio::test]
async fn test_invalid_uri_is_rejected_when_building() {
    let config = ProviderConfig::from_yaml_str("client:\n  uri: not-a-url\n").unwrap();
    let err = build_data_provider(config.into_options()).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Config(ConfigError::InvalidValue { .. })
    ));
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn test_merge_empty_configs() {
    let merged = ProviderConfig::merge(vec![]);
    assert_eq!(merged, ProviderConfig::default());
}

#[test]
fn test_merge_later_configs_win() {
    let base = ProviderConfig::from_yaml_str(
        r#"
client:
  uri: http://localhost:4466
  headers:
    Authorization: Bearer base
    X-Tenant: acme
  timeout_secs: 30
introspection:
  exclude: [AuditLog]
  operation_names:
    GET_LIST: "all{plural}"
    GET_ONE: "{camel}"
"#,
    )
    .unwrap();

    let overlay = ProviderConfig::from_yaml_str(
        r#"
client:
  uri: https://prisma.example.com
  headers:
    Authorization: Bearer overlay
debug: true
introspection:
  operation_names:
    GET_ONE: "{camel}ById"
"#,
    )
    .unwrap();

    let merged = ProviderConfig::merge(vec![base, overlay]);

    let client = merged.client.as_ref().unwrap();
    assert_eq!(client.uri, "https://prisma.example.com");
    assert_eq!(client.headers["Authorization"], "Bearer overlay");
    assert_eq!(client.headers["X-Tenant"], "acme");
    assert_eq!(client.timeout_secs, Some(30));
    assert!(merged.debug);
    assert_eq!(
        merged.introspection.exclude,
        Some(vec!["AuditLog".to_string()])
    );
    assert_eq!(
        merged.introspection.operation_names[&FetchType::GetList],
        "all{plural}"
    );
    assert_eq!(
        merged.introspection.operation_names[&FetchType::GetOne],
        "{camel}ById"
    );
}

#[test]
fn test_merge_keeps_client_from_earlier_config() {
    let base = ProviderConfig::from_yaml_str("client:\n  uri: http://localhost:4466\n").unwrap();
    let overlay = ProviderConfig::from_yaml_str("debug: true\n").unwrap();

    let merged = ProviderConfig::merge(vec![base, overlay]);
    assert_eq!(merged.client.unwrap().uri, "http://localhost:4466");
}

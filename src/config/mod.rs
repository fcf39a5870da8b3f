//! Configuration loading and management

use crate::client::ClientOptions;
use crate::core::fetch::FetchType;
use crate::introspection::{IntrospectionOptions, OperationNames};
use crate::provider::ProviderOptions;
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resource discovery settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Only expose these resources
    #[serde(default)]
    pub include: Option<Vec<String>>,

    /// Hide these resources
    #[serde(default)]
    pub exclude: Option<Vec<String>>,

    /// Operation-name templates per fetch type (e.g. `GET_LIST: "all{plural}"`)
    ///
    /// Placeholders: `{name}`, `{camel}`, `{plural}`.
    #[serde(default)]
    pub operation_names: IndexMap<FetchType, String>,
}

/// Complete configuration for the data provider
///
/// ```yaml
/// client:
///   uri: http://localhost:4466
///   headers:
///     Authorization: Bearer secret
/// debug: true
/// introspection:
///   exclude: [AuditLog]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub client: Option<ClientOptions>,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub introspection: IntrospectionConfig,
}

impl ProviderConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge configurations, later ones taking precedence
    ///
    /// Client headers and operation names are merged key by key; `debug` is
    /// on if any configuration turns it on.
    pub fn merge(configs: Vec<ProviderConfig>) -> Self {
        configs
            .into_iter()
            .fold(ProviderConfig::default(), |mut merged, config| {
                merged.client = match (merged.client.take(), config.client) {
                    (Some(mut base), Some(over)) => {
                        base.uri = over.uri;
                        base.headers.extend(over.headers);
                        base.timeout_secs = over.timeout_secs.or(base.timeout_secs);
                        Some(base)
                    }
                    (base, over) => over.or(base),
                };

                merged.debug |= config.debug;

                let introspection = config.introspection;
                if introspection.include.is_some() {
                    merged.introspection.include = introspection.include;
                }
                if introspection.exclude.is_some() {
                    merged.introspection.exclude = introspection.exclude;
                }
                merged
                    .introspection
                    .operation_names
                    .extend(introspection.operation_names);

                merged
            })
    }

    /// Turn the configuration into factory options
    pub fn into_options(self) -> ProviderOptions {
        let operation_names = OperationNames::from_templates(&self.introspection.operation_names);

        ProviderOptions {
            client: None,
            client_options: self.client,
            debug: self.debug,
            introspection: IntrospectionOptions {
                operation_names,
                include: self.introspection.include,
                exclude: self.introspection.exclude,
                schema: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::Resource;

    const YAML: &str = r#"
client:
  uri: http://localhost:4466
  headers:
    Authorization: Bearer secret
debug: true
introspection:
  exclude: [AuditLog]
  operation_names:
    GET_LIST: "all{plural}"
"#;

    #[test]
    fn test_from_yaml_str() {
        let config = ProviderConfig::from_yaml_str(YAML).unwrap();

        assert!(config.debug);
        let client = config.client.as_ref().unwrap();
        assert_eq!(client.uri, "http://localhost:4466");
        assert_eq!(client.headers["Authorization"], "Bearer secret");
        assert_eq!(
            config.introspection.exclude,
            Some(vec!["AuditLog".to_string()])
        );
        assert_eq!(
            config.introspection.operation_names[&FetchType::GetList],
            "all{plural}"
        );
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = ProviderConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_into_options() {
        let options = ProviderConfig::from_yaml_str(YAML).unwrap().into_options();

        assert!(options.debug);
        assert!(options.client.is_none());
        assert!(options.client_options.is_some());
        assert_eq!(
            options
                .introspection
                .operation_names
                .resolve(FetchType::GetList, &Resource::new("User"))
                .as_deref(),
            Some("allusers")
        );
        assert!(!options.introspection.operation_names.contains(FetchType::GetOne));
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ProviderConfig::from_yaml_str(YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = ProviderConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_fetch_type_is_rejected() {
        let yaml = "introspection:\n  operation_names:\n    GET_EVERYTHING: everything\n";
        assert!(ProviderConfig::from_yaml_str(yaml).is_err());
    }
}

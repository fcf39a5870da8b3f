use crate::client::{ClientOptions, GraphQLClient};
use crate::introspection::IntrospectionOptions;
use std::fmt;
use std::sync::Arc;

/// Options accepted by [`build_data_provider`](super::build_data_provider)
///
/// Either `client` or `client_options` must be set; a ready client wins.
#[derive(Clone, Default)]
pub struct ProviderOptions {
    /// Client to send operations through
    pub client: Option<Arc<dyn GraphQLClient>>,

    /// Options for building an [`HttpClient`](crate::client::HttpClient)
    pub client_options: Option<ClientOptions>,

    /// Log every forwarded result at debug level
    pub debug: bool,

    pub introspection: IntrospectionOptions,
}

impl ProviderOptions {
    pub fn with_client(client: impl GraphQLClient + 'static) -> Self {
        Self {
            client: Some(Arc::new(client)),
            ..Default::default()
        }
    }

    pub fn with_client_options(client_options: ClientOptions) -> Self {
        Self {
            client_options: Some(client_options),
            ..Default::default()
        }
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn introspection(mut self, introspection: IntrospectionOptions) -> Self {
        self.introspection = introspection;
        self
    }
}

impl fmt::Debug for ProviderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderOptions")
            .field("client", &self.client.as_ref().map(|_| "<client>"))
            .field("client_options", &self.client_options)
            .field("debug", &self.debug)
            .field("introspection", &self.introspection)
            .finish()
    }
}

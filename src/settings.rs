use config::{Config, Environment, File};
use serde::Deserialize;

/// Fallback endpoint for a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:50051";

/// Anything the transport can ask for a base URL at call time.
///
/// The endpoint is never baked in at build time: the same binary talks to a
/// Docker deployment in one install and a desktop-app sidecar in another, so
/// the transport resolves the target through this seam on every call.
pub trait EndpointSource: Send + Sync {
    fn base_url(&self) -> String;
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub base_url: String,
}

/// Runtime configuration, merged from an optional config file and
/// `HUSH`-prefixed environment variables.
///
/// `HUSH_SERVER__BASE_URL=https://hush.example.org` overrides whatever the
/// file says.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
}

impl Settings {
    pub fn load(config_name: &str) -> crate::Result<Settings> {
        let mut settings = Config::default();
        settings.set_default("server.base_url", DEFAULT_BASE_URL.to_string())?;
        settings.merge(File::with_name(config_name).required(false))?;
        settings.merge(Environment::with_prefix("HUSH").separator("__"))?;
        Ok(settings.try_into::<Settings>()?)
    }
}

impl EndpointSource for Settings {
    fn base_url(&self) -> String {
        self.server.base_url.trim_end_matches('/').to_string()
    }
}

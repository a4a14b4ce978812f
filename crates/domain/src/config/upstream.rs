use serde::{Deserialize, Serialize};

/// Upstream recursive resolvers (`[upstream]` table)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Servers as `ip:port`, tried in order
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra rounds over the server list after the first one fails
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_retries() -> u32 {
    1
}

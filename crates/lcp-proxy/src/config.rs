use std::time::Duration;

use lcp_channel::{ChannelConfig, TransportMode};
use serde::{Deserialize, Serialize};

/// Per-context proxy settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Transport mode the proxy connects in.
    pub mode: TransportMode,
    /// Bound on every wait for a correlated response.
    pub response_timeout_ms: u64,
    /// Records held client-side in buffered mode before an automatic flush.
    pub pipeline_depth: usize,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Unbuffered,
            response_timeout_ms: 60_000,
            pipeline_depth: 128,
        }
    }
}

impl ProxyConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn channel_config(&self) -> ChannelConfig {
        ChannelConfig {
            mode: self.mode,
            response_timeout: self.response_timeout(),
            pipeline_depth: self.pipeline_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.mode, TransportMode::Unbuffered);
        assert_eq!(config.response_timeout(), Duration::from_secs(60));
        assert_eq!(config.channel_config().pipeline_depth, 128);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ProxyConfig = serde_json::from_str(r#"{"mode":"buffered"}"#).unwrap();
        assert_eq!(config.mode, TransportMode::Buffered);
        assert_eq!(config.response_timeout_ms, 60_000);
    }
}

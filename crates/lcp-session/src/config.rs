use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use lcp_proxy::{ProxyConfig, ValidationMode};
use lcp_types::{LinecardConfig, LinecardContainer};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{SessionError, SessionResult};

/// One execution context: a backend instance and its line cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    pub guid: u64,
    pub name: String,
    #[serde(rename = "dbAsic")]
    pub db_asic: String,
    #[serde(rename = "dbCounters")]
    pub db_counters: String,
    #[serde(rename = "dbFlex")]
    pub db_flex: String,
    #[serde(rename = "dbState")]
    pub db_state: String,
    #[serde(default)]
    pub linecards: Vec<LinecardConfig>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            guid: 0,
            name: "lcp0".into(),
            db_asic: "ASIC_DB".into(),
            db_counters: "COUNTERS_DB".into(),
            db_flex: "FLEX_COUNTER_DB".into(),
            db_state: "STATE_DB".into(),
            linecards: vec![LinecardConfig::new(0, "")],
        }
    }
}

impl ContextConfig {
    /// The context id as carried in object ids.
    pub fn context(&self) -> SessionResult<u8> {
        u8::try_from(self.guid)
            .map_err(|_| SessionError::Config(format!("context guid {} exceeds 255", self.guid)))
    }

    pub fn linecard_container(&self) -> SessionResult<LinecardContainer> {
        Ok(LinecardContainer::from_configs(self.linecards.iter().cloned())?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ContextsFile {
    #[serde(rename = "CONTEXTS")]
    contexts: Vec<ContextConfig>,
}

/// Read and validate a context configuration file.
pub fn read_contexts(path: &Path) -> SessionResult<Vec<ContextConfig>> {
    let text = fs::read_to_string(path)?;
    let file: ContextsFile =
        serde_json::from_str(&text).map_err(|e| SessionError::Config(e.to_string()))?;
    validate(&file.contexts)?;
    Ok(file.contexts)
}

fn validate(contexts: &[ContextConfig]) -> SessionResult<()> {
    if contexts.is_empty() {
        return Err(SessionError::Config("no contexts configured".into()));
    }
    let mut seen = HashSet::new();
    for context in contexts {
        let id = context.context()?;
        if !seen.insert(id) {
            return Err(SessionError::Config(format!("duplicate context guid {id}")));
        }
        context.linecard_container()?;
    }
    Ok(())
}

/// Load the context configuration, falling back to a single default
/// context when the file is absent or invalid.
pub fn load_contexts(path: Option<&Path>) -> Vec<ContextConfig> {
    let Some(path) = path else {
        info!("no context configuration file, using default context");
        return vec![ContextConfig::default()];
    };
    match read_contexts(path) {
        Ok(contexts) => {
            info!(path = %path.display(), contexts = contexts.len(), "context configuration loaded");
            contexts
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid context configuration, using default context");
            vec![ContextConfig::default()]
        }
    }
}

/// Settings for a whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Context configuration file; `None` selects the default context.
    pub contexts_path: Option<PathBuf>,
    /// Applied to every context.
    pub proxy: ProxyConfig,
    pub validation: ValidationMode,
}

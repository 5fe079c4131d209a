use std::path::{Path, PathBuf};
use std::time::Duration;

use decen_fetch::{CandidateServer, DEFAULT_USER_AGENT, FetchOptions, parse_server_list};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "decen.toml";
pub const ENV_PREFIX: &str = "DECEN_";

/// Where the mirror reads servers from and writes to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Ranked server list, one base URL per line.
    pub servers_file: PathBuf,
    /// Rewritten documents, one directory per digest.
    pub cache_root: PathBuf,
    /// Mirrored assets, grouped by basename.
    pub store_root: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            servers_file: PathBuf::from("servers.txt"),
            cache_root: PathBuf::from("data_servers"),
            store_root: PathBuf::from("data"),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl MirrorConfig {
    /// Defaults, then `decen.toml` in the working directory, then `DECEN_*`.
    pub fn load() -> Result<Self, ConfigError> { Self::load_from(CONFIG_FILE) }

    /// Like [`MirrorConfig::load`] with an explicit file. A missing file is
    /// not an error; its layer is simply empty.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment(path.as_ref()).extract().map_err(Into::into)
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .timeout(self.timeout())
            .user_agent(self.user_agent.clone())
    }

    pub fn load_servers(&self) -> Result<Vec<CandidateServer>, ConfigError> {
        load_servers(&self.servers_file)
    }
}

/// Read a ranked server list.
///
/// An unreadable file is [`ConfigError::MissingServerList`]; an empty one
/// is a valid, empty list.
pub fn load_servers(path: impl AsRef<Path>) -> Result<Vec<CandidateServer>, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::MissingServerList {
        path: path.to_path_buf(),
        source,
    })?;
    let servers = parse_server_list(&text);
    tracing::debug!(path = %path.display(), count = servers.len(), "loaded server list");
    Ok(servers)
}

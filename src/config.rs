use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FolioConfig {
    /// Connection string of the persistent store; absent means in-memory
    pub database_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Built frontend served for non-API paths
    pub static_dir: Option<String>,
}

impl FolioConfig {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: FolioConfig) -> FolioConfig {
        FolioConfig {
            database_url: overrides.database_url.or(self.database_url),
            host: overrides.host.or(self.host),
            port: overrides.port.or(self.port),
            static_dir: overrides.static_dir.or(self.static_dir),
        }
    }

    /// The configured connection string. Blank values count as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);
        (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("could not resolve listen address {}:{}", host, port))
    }

    pub fn static_dir(&self) -> Option<PathBuf> {
        self.static_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("folio.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<FolioConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FolioConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &FolioConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

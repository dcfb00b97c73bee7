use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use cask_store::{CasTransform, DefaultTransform, PathTransform};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage_root: PathBuf,
    pub scheme: PathScheme,
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".parse().unwrap(),
            storage_root: PathBuf::from("cask-data"),
            scheme: PathScheme::Cas,
            max_upload_size: 100 * 1024 * 1024,
        }
    }
}

/// Path derivation strategy, chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PathScheme {
    /// Hash-sharded directories and hashed file names.
    Cas,
    /// Flat `<root>/<owner>/<file>` layout.
    Default,
}

impl PathScheme {
    pub fn transform(self) -> Arc<dyn PathTransform> {
        match self {
            Self::Cas => Arc::new(CasTransform),
            Self::Default => Arc::new(DefaultTransform),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:4000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.storage_root, PathBuf::from("cask-data"));
        assert_eq!(c.scheme, PathScheme::Cas);
        assert_eq!(c.max_upload_size, 100 * 1024 * 1024);
    }

    #[test]
    fn scheme_selects_transform() {
        let pk = PathScheme::Default
            .transform()
            .transform("root", "user1^a.txt")
            .unwrap();
        assert_eq!(pk.directory, "root/user1");

        let pk = PathScheme::Cas
            .transform()
            .transform("root", "user1^a.txt")
            .unwrap();
        assert!(pk.directory.starts_with("root/"));
        assert_ne!(pk.directory, "root/user1");
    }
}

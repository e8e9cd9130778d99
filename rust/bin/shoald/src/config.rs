use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration, loaded from a TOML context file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all persistent state.
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing secret.
    pub secret: String,

    /// Access token lifetime in seconds.
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

fn default_expire_secs() -> i64 {
    86400 // 24h
}

impl ServerConfig {
    /// Resolve a context name or explicit path to a config file path.
    ///
    /// A bare name resolves to `/etc/shoal/<name>.toml`; anything with a
    /// `/` or `.` is used as-is.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/shoal/{name_or_path}.toml"))
        }
    }

    /// Load and parse the config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Verify the configuration is ready for use.
    pub fn verify(&self) -> anyhow::Result<()> {
        if self.jwt.secret.is_empty() {
            anyhow::bail!("JWT secret is empty in configuration.");
        }
        if self.storage.data_dir.is_empty() {
            anyhow::bail!("Storage data_dir is empty in configuration.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [storage]
        data_dir = "/var/lib/shoal"

        [jwt]
        secret = "s3cret"
    "#;

    #[test]
    fn parse_sample_config() {
        let config: ServerConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.storage.data_dir, "/var/lib/shoal");
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.expire_secs, 86400);
        assert!(config.verify().is_ok());
    }

    #[test]
    fn verify_rejects_empty_secret() {
        let mut config: ServerConfig = toml::from_str(SAMPLE).unwrap();
        config.jwt.secret.clear();
        assert!(config.verify().is_err());
    }

    #[test]
    fn resolve_name_vs_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/shoal/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.jwt.secret, "s3cret");
        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}

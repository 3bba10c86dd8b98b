use anyhow::Result;
use anyhow::anyhow;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

/// Connection settings for the document store. Either a full `uri` is given
/// (or injected through `MONGODB_URI`), or the URI is assembled from
/// `username`/`password`/`cluster_host` in the Atlas `mongodb+srv` form.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub cluster_host: String,
    #[serde(default = "default_database_name")]
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            username: String::new(),
            password: String::new(),
            cluster_host: String::new(),
            database: default_database_name(),
        }
    }
}

fn default_database_name() -> String {
    "garage".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_secret: "dev-secret-change-me".into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origin: "http://localhost:5173".into() }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` if present (missing file falls back to defaults),
    /// apply environment overrides, then validate. Environment variables win
    /// over the file when set: `SERVER_HOST`, `PORT`, `MONGODB_URI`,
    /// `DB_USER`, `DB_PASS`, `ACCESS_TOKEN_SECRET`, `CORS_ORIGIN`.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.validate()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.cors.normalize_from_env();
        self.cors.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("server.host must not be empty"));
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }

    /// Effective worker thread count; zero normalizes to the default of 4.
    pub fn worker_threads(&self) -> usize {
        match self.worker_threads {
            Some(0) | None => 4,
            Some(n) => n,
        }
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(uri) = std::env::var("MONGODB_URI") {
            if !uri.trim().is_empty() {
                self.uri = uri;
            }
        }
        if let Ok(user) = std::env::var("DB_USER") {
            if !user.trim().is_empty() {
                self.username = user;
            }
        }
        if let Ok(pass) = std::env::var("DB_PASS") {
            if !pass.trim().is_empty() {
                self.password = pass;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            if self.username.trim().is_empty()
                || self.password.trim().is_empty()
                || self.cluster_host.trim().is_empty()
            {
                return Err(anyhow!(
                    "database is unconfigured; set MONGODB_URI, or DB_USER/DB_PASS plus database.cluster_host"
                ));
            }
        } else {
            let lower = self.uri.to_lowercase();
            if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
                return Err(anyhow!("database.uri must start with mongodb:// or mongodb+srv://"));
            }
        }
        if self.database.trim().is_empty() {
            return Err(anyhow!("database.database must not be empty"));
        }
        Ok(())
    }

    /// Full connection string: an explicit `uri` wins, otherwise the Atlas
    /// form is assembled from the credential parts.
    pub fn connection_uri(&self) -> String {
        if !self.uri.trim().is_empty() {
            return self.uri.clone();
        }
        format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            self.username, self.password, self.cluster_host
        )
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(secret) = std::env::var("ACCESS_TOKEN_SECRET") {
            if !secret.trim().is_empty() {
                self.token_secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_secret.trim().is_empty() {
            return Err(anyhow!("auth.token_secret must not be empty"));
        }
        Ok(())
    }
}

impl CorsConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            if !origin.trim().is_empty() {
                self.allowed_origin = origin;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.allowed_origin.trim().is_empty() {
            return Err(anyhow!("cors.allowed_origin must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.database.database, "garage");
        assert_eq!(cfg.cors.allowed_origin, "http://localhost:5173");
        assert!(!cfg.auth.token_secret.is_empty());
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            uri = "mongodb://localhost:27017"
            database = "garage_dev"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.uri, "mongodb://localhost:27017");
        assert_eq!(cfg.database.database, "garage_dev");
        // untouched sections fall back to defaults
        assert_eq!(cfg.cors.allowed_origin, "http://localhost:5173");
    }

    #[test]
    fn load_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("garage_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 5100\n\n[auth]\ntoken_secret = \"s3cret\"\n",
        )
        .expect("write temp config");
        let cfg = load_from_file(path.to_str().unwrap()).expect("load");
        assert_eq!(cfg.server.port, 5100);
        assert_eq!(cfg.auth.token_secret, "s3cret");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn validate_rejects_unconfigured_database() {
        let cfg = DatabaseConfig::default();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_foreign_uri_scheme() {
        let cfg = DatabaseConfig { uri: "postgres://x".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn connection_uri_prefers_explicit_uri() {
        let cfg = DatabaseConfig {
            uri: "mongodb://localhost:27017".into(),
            username: "ignored".into(),
            password: "ignored".into(),
            cluster_host: "ignored.example.net".into(),
            ..Default::default()
        };
        assert_eq!(cfg.connection_uri(), "mongodb://localhost:27017");
    }

    #[test]
    fn connection_uri_assembles_atlas_form() {
        let cfg = DatabaseConfig {
            username: "shop".into(),
            password: "pw".into(),
            cluster_host: "cluster0.example.mongodb.net".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.connection_uri(),
            "mongodb+srv://shop:pw@cluster0.example.mongodb.net/?retryWrites=true&w=majority"
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn worker_threads_normalizes_zero() {
        let cfg = ServerConfig { worker_threads: Some(0), ..Default::default() };
        assert_eq!(cfg.worker_threads(), 4);
        let cfg = ServerConfig { worker_threads: Some(8), ..Default::default() };
        assert_eq!(cfg.worker_threads(), 8);
    }
}

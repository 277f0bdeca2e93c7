use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_WORKER_THREADS: usize = 4;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub log_json: bool,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
    /// Upper bound for JSON request bodies; base64 photos are large.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            log_json: false,
            frontend_dir: default_frontend_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Where photos live on disk and under which URL path they are served.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_base_upload_folder")]
    pub base_upload_folder: String,
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_upload_folder: default_base_upload_folder(),
            public_url_prefix: default_public_url_prefix(),
        }
    }
}

fn default_host() -> String { DEFAULT_HOST.into() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_frontend_dir() -> PathBuf { PathBuf::from("frontend") }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }
fn default_base_upload_folder() -> String { "static/uploads".into() }
fn default_public_url_prefix() -> String { "/static/uploads".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults overridden by
    /// `SERVER_HOST` / `SERVER_PORT` / `SERVER_DEBUG` / `TOKIO_WORKER_THREADS`.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    /// Only a missing file falls back to the environment; a file that exists
    /// but cannot be read or parsed is an error.
    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("无法加载配置文件 {path}"))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `SERVER_*` /
    /// `TOKIO_WORKER_THREADS` keys. Unparsable numbers are ignored.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(debug) = lookup("SERVER_DEBUG") {
            cfg.server.debug = parse_flag(&debug);
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize()?;
        Ok(())
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("server.max_body_bytes 必须 >= 1"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.base_upload_folder.trim().is_empty() {
            return Err(anyhow!("storage.base_upload_folder 不能为空"));
        }
        if !self.public_url_prefix.starts_with('/') {
            return Err(anyhow!("storage.public_url_prefix 必须以 / 开头"));
        }
        let trimmed = self.public_url_prefix.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(anyhow!("storage.public_url_prefix 不能是根路径 /"));
        }
        self.public_url_prefix = trimmed.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("configs_{}_{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_defaults() {
        let path = temp_config(
            "malformed",
            r#"
            [server]
            port = "not a number"

            [storage]
            base_upload_folder = "/srv/photos"
            "#,
        );
        let res = AppConfig::load_and_validate_from(&path.to_string_lossy());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn toml_syntax_error_is_an_error() {
        let path = temp_config("syntax", "[server\nport = 5000\n");
        let res = AppConfig::load_and_validate_from(&path.to_string_lossy());
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn existing_file_is_used() {
        let path = temp_config("existing", "[storage]\nbase_upload_folder = \"/srv/photos/\"\n[server]\nport = 6001\n");
        let cfg = AppConfig::load_and_validate_from(&path.to_string_lossy()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.storage.base_upload_folder, "/srv/photos/");
        assert_eq!(cfg.server.port, 6001);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join(format!("configs_missing_{}.toml", std::process::id()));
        let cfg = AppConfig::load_and_validate_from(&missing.to_string_lossy()).unwrap();
        assert_eq!(cfg.storage.base_upload_folder, "static/uploads");
    }

    #[test]
    fn missing_file_error_is_detected() {
        let err = load_from_file("/definitely/not/here/config.toml").unwrap_err();
        assert!(is_missing_file(&err));
        let err = parse("port = ").unwrap_err();
        assert!(!is_missing_file(&err));
    }

    #[test]
    fn vars_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8099"),
            ("SERVER_DEBUG", "true"),
            ("TOKIO_WORKER_THREADS", "2"),
        ]
        .into_iter()
        .collect();
        let cfg = AppConfig::from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8099");
        assert!(cfg.server.debug);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.storage.base_upload_folder, "static/uploads");
    }

    #[test]
    fn unparsable_vars_are_ignored() {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "http"),
            ("SERVER_DEBUG", "0"),
            ("TOKIO_WORKER_THREADS", "many"),
        ]
        .into_iter()
        .collect();
        let cfg = AppConfig::from_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.server.port, 5000);
        assert!(!cfg.server.debug);
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:5000");
        assert!(!cfg.server.debug);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.max_body_bytes, 64 * 1024 * 1024);
        assert_eq!(cfg.storage.base_upload_folder, "static/uploads");
        assert_eq!(cfg.storage.public_url_prefix, "/static/uploads");
    }

    #[test]
    fn parses_full_file() {
        let mut cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8088
            debug = true
            worker_threads = 0
            log_json = true
            frontend_dir = "web"
            max_body_bytes = 1024

            [storage]
            base_upload_folder = "/srv/photos"
            public_url_prefix = "/media/"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8088");
        assert!(cfg.server.debug);
        assert!(cfg.server.log_json);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.frontend_dir, PathBuf::from("web"));
        assert_eq!(cfg.server.max_body_bytes, 1024);
        assert_eq!(cfg.storage.base_upload_folder, "/srv/photos");
        assert_eq!(cfg.storage.public_url_prefix, "/media");
    }

    #[test]
    fn rejects_invalid_storage() {
        let mut cfg = AppConfig::default();
        cfg.storage.base_upload_folder = "  ".into();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.public_url_prefix = "static".into();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.public_url_prefix = "/".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_port_zero_and_fills_blank_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = " ".into();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");

        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" True "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }
}

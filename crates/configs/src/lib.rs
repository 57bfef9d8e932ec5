use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_FUNCTION_URL: &str = "https://sayfunction-197292358524.us-east1.run.app";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prices: PricesConfig,
    #[serde(default)]
    pub say: SayConfig,
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
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

/// How the price store numbers new items.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `id = len + 1` at insertion time; may collide after a deletion.
    #[default]
    LengthPlusOne,
    /// One past the highest id ever issued in the collection.
    Monotonic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricesConfig {
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self { id_strategy: IdStrategy::default(), seed: default_seed() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SayConfig {
    #[serde(default = "default_say_host")]
    pub host: String,
    #[serde(default = "default_say_port")]
    pub port: u16,
    #[serde(default = "default_function_url")]
    pub function_url: String,
    #[serde(default = "default_keyword")]
    pub default_keyword: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SayConfig {
    fn default() -> Self {
        Self {
            host: default_say_host(),
            port: default_say_port(),
            function_url: default_function_url(),
            default_keyword: default_keyword(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_seed() -> bool { true }
fn default_say_host() -> String { "127.0.0.1".into() }
fn default_say_port() -> u16 { 3001 }
fn default_function_url() -> String { DEFAULT_FUNCTION_URL.into() }
fn default_keyword() -> String { "nothing".into() }
fn default_timeout() -> u64 { 10 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
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
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults overlaid with environment variables.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_else(|_| Self::from_env());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT") {
            cfg.server.port = port;
        }
        if let Some(w) = env_parse::<usize>("TOKIO_WORKER_THREADS") {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(host) = std::env::var("SAY_HOST") {
            cfg.say.host = host;
        }
        if let Some(port) = env_parse::<u16>("SAY_PORT") {
            cfg.say.port = port;
        }
        if let Ok(url) = std::env::var("SAY_FUNCTION_URL") {
            cfg.say.function_url = url;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.say.normalize_and_validate()?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SayConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_say_host();
        }
        if self.port == 0 {
            return Err(anyhow!("say.port must be in 1..=65535"));
        }
        let lower = self.function_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("say.function_url must start with http:// or https://"));
        }
        if self.default_keyword.is_empty() {
            return Err(anyhow!("say.default_keyword must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("say.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").expect("parse");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.prices.id_strategy, IdStrategy::LengthPlusOne);
        assert!(cfg.prices.seed);
        assert_eq!(cfg.say.port, 3001);
        assert_eq!(cfg.say.function_url, DEFAULT_FUNCTION_URL);
        assert_eq!(cfg.say.default_keyword, "nothing");
    }

    #[test]
    fn parses_all_sections() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            worker_threads = 0

            [prices]
            id_strategy = "monotonic"
            seed = false

            [say]
            port = 9000
            function_url = "http://localhost:7000/fn"
            timeout_secs = 3
            "#,
        )
        .expect("parse");
        let mut cfg = cfg;
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.prices.id_strategy, IdStrategy::Monotonic);
        assert!(!cfg.prices.seed);
        assert_eq!(cfg.say.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.say.timeout_secs, 3);
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = parse("[server]\nhost = \"h\"\nport = 0\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[say]\nfunction_url = \"ftp://x\"\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[say]\ntimeout_secs = 0\n").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());

        assert!(parse("[prices]\nid_strategy = \"random\"\n").is_err());
    }

    #[test]
    fn blank_host_falls_back_to_loopback() {
        let mut cfg = parse("[server]\nhost = \" \"\nport = 1\n").expect("parse");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.host, "127.0.0.1");
    }
}

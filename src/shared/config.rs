//! Application configuration. Backend location, action server bind address.

use serde::Deserialize;

pub const DEFAULT_API_HOST: &str = "localhost";
pub const DEFAULT_API_PORT: &str = "5000";
/// Port the backend listens on when `NODE_ENV=production`.
pub const PRODUCTION_API_PORT: &str = "8080";
pub const DEFAULT_ACTION_SERVER_HOST: &str = "0.0.0.0";
/// Port the dialogue engine expects custom actions on.
pub const DEFAULT_ACTION_SERVER_PORT: u16 = 5055;

/// Where the backend REST API lives. Built once at startup and handed to the
/// backend adapter; nothing reads the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: String,
}

impl ApiConfig {
    /// Apply defaults: host `localhost`; port `5000`, or `8080` in production.
    /// Empty values count as unset.
    pub fn resolve(host: Option<&str>, port: Option<&str>, node_env: Option<&str>) -> Self {
        let host = host.filter(|h| !h.is_empty()).unwrap_or(DEFAULT_API_HOST);
        let default_port = if node_env == Some("production") {
            PRODUCTION_API_PORT
        } else {
            DEFAULT_API_PORT
        };
        let port = port.filter(|p| !p.is_empty()).unwrap_or(default_port);
        Self {
            host: host.to_string(),
            port: port.to_string(),
        }
    }

    /// `http://{host}:{port}/api`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/api", self.host, self.port)
    }
}

/// How the binary runs when started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Serve the webhook for the dialogue engine.
    Server,
    /// Interactive prompts in the terminal.
    Console,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend host. Read from API_HOST (or MEDIA_PULSE_API_HOST).
    #[serde(default)]
    pub api_host: Option<String>,

    /// Backend port. Read from API_PORT (or MEDIA_PULSE_API_PORT).
    #[serde(default)]
    pub api_port: Option<String>,

    /// Deployment environment; "production" switches the default backend port. Read from NODE_ENV.
    #[serde(default)]
    pub node_env: Option<String>,

    /// Action server bind host. Read from MEDIA_PULSE_ACTION_SERVER_HOST.
    #[serde(default)]
    pub action_server_host: Option<String>,

    /// Action server bind port. Read from MEDIA_PULSE_ACTION_SERVER_PORT.
    #[serde(default)]
    pub action_server_port: Option<u16>,

    /// "server" or "console". Read from MEDIA_PULSE_MODE; prompts when unset.
    #[serde(default)]
    pub mode: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MEDIA_PULSE"));
        if let Ok(path) = std::env::var("MEDIA_PULSE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // API_HOST / API_PORT / NODE_ENV are shared with the backend's own .env, so read them unprefixed.
        if let Ok(host) = std::env::var("API_HOST") {
            cfg.api_host = Some(host);
        }
        if let Ok(port) = std::env::var("API_PORT") {
            cfg.api_port = Some(port);
        }
        if let Ok(env) = std::env::var("NODE_ENV") {
            cfg.node_env = Some(env);
        }
        Ok(cfg)
    }

    /// Backend location with defaults applied.
    pub fn api(&self) -> ApiConfig {
        ApiConfig::resolve(
            self.api_host.as_deref(),
            self.api_port.as_deref(),
            self.node_env.as_deref(),
        )
    }

    /// Action server bind address. Defaults to 0.0.0.0:5055.
    pub fn action_server_addr(&self) -> String {
        format!(
            "{}:{}",
            self.action_server_host
                .as_deref()
                .unwrap_or(DEFAULT_ACTION_SERVER_HOST),
            self.action_server_port
                .unwrap_or(DEFAULT_ACTION_SERVER_PORT)
        )
    }

    /// Run mode from config, or `None` when the user should be asked.
    pub fn run_mode(&self) -> Option<RunMode> {
        match self.mode.as_deref().map(str::to_lowercase).as_deref() {
            Some("server") => Some(RunMode::Server),
            Some("console") => Some(RunMode::Console),
            _ => None,
        }
    }
}

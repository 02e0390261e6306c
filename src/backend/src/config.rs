use anyhow::{Context, Result};
use std::{env, path::PathBuf, sync::OnceLock, time::Duration};

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// UI server configuration
    pub ui: UiConfig,

    /// Motor controller (ESP32) configuration
    pub controller: ControllerConfig,
}

#[derive(Clone, Debug)]
pub struct UiConfig {
    pub port: u16,
    /// Directory holding the built web shell (index.html, wasm, js)
    pub dist_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub ip: String,
    pub port: u16,
    pub timeout: Duration,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// Returns a reference to the cached configuration. On first call, it loads
    /// and validates all configuration from environment variables.
    ///
    /// # Panics
    /// Panics if configuration loading fails. The service cannot run without
    /// a valid configuration.
    pub fn get() -> &'static Self {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        APP_CONFIG.get_or_init(|| Self::load().expect("failed to load application configuration"))
    }

    /// Load and validate all configuration from environment variables
    pub fn load() -> Result<Self> {
        let ui = UiConfig::load()?;
        let controller = ControllerConfig::load()?;

        Ok(Self { ui, controller })
    }
}

impl UiConfig {
    fn load() -> Result<Self> {
        let port = env::var("UI_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("failed to parse UI_PORT: invalid format")?;

        let dist_dir = env::var("UI_DIST_DIR")
            .unwrap_or_else(|_| "ui/dist".to_string())
            .into();

        Ok(Self { port, dist_dir })
    }
}

impl ControllerConfig {
    fn load() -> Result<Self> {
        let ip = env::var("ESP32_IP").unwrap_or_else(|_| "192.168.1.100".to_string());

        let port = env::var("ESP32_PORT")
            .unwrap_or_else(|_| "80".to_string())
            .parse::<u16>()
            .context("failed to parse ESP32_PORT: invalid format")?;

        let timeout_ms = env::var("ESP32_TIMEOUT_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse::<u64>()
            .context("failed to parse ESP32_TIMEOUT_MS: invalid format")?;

        Ok(Self {
            ip,
            port,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Endpoint receiving tracking reports
    pub fn data_endpoint(&self) -> String {
        format!("http://{}:{}/data", self.ip, self.port)
    }
}

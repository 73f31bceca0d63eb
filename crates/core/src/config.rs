use crate::paginate::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Artificial wait before a simulated export reports success.
    #[serde(default = "default_export_delay_ms")]
    pub delay_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_export_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON fixture with projects; the built-in sample set is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_export_delay_ms() -> u64 {
    1500
}

fn default_log_filter() -> String {
    "info".to_string()
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("REVIEW")
            .separator("__")
            .try_parsing(true),
    );
    let cfg = settings.build()?;
    let mut app: AppConfig = cfg.try_deserialize()?;
    if app.browser.page_size == 0 {
        anyhow::bail!("browser.page_size must be at least 1");
    }
    app.logging.filter = app.logging.filter.trim().to_string();
    Ok(app)
}

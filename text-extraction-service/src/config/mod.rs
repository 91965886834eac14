use service_core::config::{self as core_config, get_env_parsed, is_production};
use service_core::error::AppError;
use service_core::ocr::OcrSettings;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct TextExtractionConfig {
    pub common: core_config::Config,
    pub fetch: FetchConfig,
    pub ocr: OcrSettings,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request budget for downloading the image.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_image_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            connect_timeout_secs: 5,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl TextExtractionConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = is_production();

        Ok(TextExtractionConfig {
            common: common_config,
            fetch: FetchConfig {
                timeout_secs: get_env_parsed("FETCH_TIMEOUT_SECS", "15", is_prod)?,
                connect_timeout_secs: get_env_parsed("FETCH_CONNECT_TIMEOUT_SECS", "5", is_prod)?,
                max_image_bytes: get_env_parsed("MAX_IMAGE_BYTES", "10485760", is_prod)?,
            },
            ocr: OcrSettings::from_env(is_prod)?,
        })
    }
}

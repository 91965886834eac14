use service_core::config::{self as core_config, get_env, get_env_parsed, is_production};
use service_core::error::AppError;
use service_core::ocr::OcrSettings;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Clone)]
pub struct MedicineConfig {
    pub common: core_config::Config,
    pub catalog: CatalogConfig,
    pub upload: UploadConfig,
    pub ocr: OcrSettings,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// CSV file read once at startup.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl MedicineConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = is_production();

        Ok(MedicineConfig {
            common: common_config,
            catalog: CatalogConfig {
                path: PathBuf::from(get_env(
                    "MEDICINE_CATALOG_PATH",
                    Some("data/medicines.csv"),
                    is_prod,
                )?),
            },
            upload: UploadConfig {
                max_upload_bytes: get_env_parsed("MAX_UPLOAD_BYTES", "10485760", is_prod)?,
            },
            ocr: OcrSettings::from_env(is_prod)?,
        })
    }
}

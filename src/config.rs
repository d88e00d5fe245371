use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "website/site.toml";

/// Site configuration, read once at launch and shared via Rocket managed
/// state. Every section has a usable default so a missing file only costs a
/// warning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub data_dir: String,
    pub donation: DonationConfig,
    pub vietqr: VietQrConfig,
}

/// Account shown in the donation modal. The QR image URL is assembled from
/// these parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DonationConfig {
    pub bank_code: String,
    pub account_number: String,
    pub account_name: String,
    pub template: String,
}

/// Optional credentials for the VietQR API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VietQrConfig {
    pub api_key: String,
    pub client_id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Chùa Kỳ Viên - Tân Xuân".to_string(),
            data_dir: "website/data".to_string(),
            donation: DonationConfig::default(),
            vietqr: VietQrConfig::default(),
        }
    }
}

impl Default for DonationConfig {
    fn default() -> Self {
        DonationConfig {
            bank_code: "VPB".to_string(),
            account_number: "0375595720".to_string(),
            account_name: "Nguyễn Minh Tín".to_string(),
            template: "compact2".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

/// Read the config file, falling back to defaults when it is absent or
/// malformed.
pub fn load() -> SiteConfig {
    load_from(Path::new(CONFIG_FILE))
}

pub fn load_from(path: &Path) -> SiteConfig {
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str(&raw) {
            Ok(cfg) => {
                info!("đã nạp cấu hình từ {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("cấu hình {} không hợp lệ ({}), dùng mặc định", path.display(), e);
                SiteConfig::default()
            }
        },
        Err(_) => {
            warn!("không tìm thấy {}, dùng cấu hình mặc định", path.display());
            SiteConfig::default()
        }
    }
}

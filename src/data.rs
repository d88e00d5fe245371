use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::models::campaign::Campaign;
use crate::models::gallery::{GalleryImage, ImageDescriptor};
use crate::models::menu::MenuData;

pub const CAMPAIGNS_FILE: &str = "charity-campaigns.json";
pub const MENUS_FILE: &str = "menus.json";
pub const IMAGES_FILE: &str = "images.json";

/// Resource load failure: the file could not be read, or its JSON does not
/// match the declared schema. Both collapse to the same user-visible
/// fallback in the affected page region.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("không đọc được {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dữ liệu {path} không hợp lệ: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct CampaignDocument {
    #[serde(default)]
    campaigns: Vec<Campaign>,
}

#[derive(Deserialize)]
struct ImageDocument {
    #[serde(default)]
    images: Vec<ImageDescriptor>,
}

/// Load the campaign collection. Records missing an id or title cannot be
/// linked or displayed and are dropped with a warning.
pub fn load_campaigns(data_dir: &Path) -> Result<Vec<Campaign>, DataError> {
    let doc: CampaignDocument = read_json(&data_dir.join(CAMPAIGNS_FILE))?;
    let total = doc.campaigns.len();
    let campaigns: Vec<Campaign> = doc
        .campaigns
        .into_iter()
        .filter(|c| !c.id.trim().is_empty() && !c.title.trim().is_empty())
        .collect();
    if campaigns.len() < total {
        warn!(
            "bỏ qua {} chiến dịch thiếu id hoặc tiêu đề trong {}",
            total - campaigns.len(),
            CAMPAIGNS_FILE
        );
    }
    Ok(campaigns)
}

/// Load the navigation tree.
pub fn load_menus(data_dir: &Path) -> Result<MenuData, DataError> {
    read_json(&data_dir.join(MENUS_FILE))
}

/// Load the gallery image list, sanitized at the boundary.
pub fn load_gallery(data_dir: &Path) -> Result<Vec<GalleryImage>, DataError> {
    let doc: ImageDocument = read_json(&data_dir.join(IMAGES_FILE))?;
    Ok(doc.images.into_iter().map(ImageDescriptor::sanitize).collect())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

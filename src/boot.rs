use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::{SiteConfig, CONFIG_FILE};
use crate::data::{CAMPAIGNS_FILE, IMAGES_FILE, MENUS_FILE};

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "website",
    "website/data",
    "website/static",
    "website/static/css",
    "website/static/js",
    "website/static/images",
];

/// Data files the page regions depend on. A missing or malformed file is
/// survivable (the affected region falls back to its error state), so
/// these only warn.
const DATA_FILES: &[&str] = &[CAMPAIGNS_FILE, MENUS_FILE, IMAGES_FILE];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories, warns about missing or malformed data
/// files, and aborts if the filesystem itself is unusable.
pub fn run(cfg: &SiteConfig) {
    info!("Kiểm tra khởi động...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Đã tạo thư mục: {}", dir),
                Err(e) => {
                    error!("  KHÔNG tạo được thư mục {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Data files ──────────────────────────────────
    let data_dir = cfg.data_dir();
    for file in DATA_FILES {
        let path = data_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
                    warn!(
                        "  Dữ liệu {} không phải JSON hợp lệ (trang liên quan sẽ hiển thị lỗi)",
                        path.display()
                    );
                    warnings += 1;
                }
            }
            Err(_) => {
                warn!(
                    "  Thiếu tập tin dữ liệu: {} (trang liên quan sẽ hiển thị lỗi)",
                    path.display()
                );
                warnings += 1;
            }
        }
    }

    // ── 3. Config file ─────────────────────────────────
    if !Path::new(CONFIG_FILE).exists() {
        warn!("  Không tìm thấy {}, dùng cấu hình mặc định", CONFIG_FILE);
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Kiểm tra khởi động THẤT BẠI: {} lỗi, {} cảnh báo. Dừng.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Kiểm tra khởi động hoàn tất với {} cảnh báo. Một số trang có thể hiển thị lỗi.",
            warnings
        );
    } else {
        info!("Kiểm tra khởi động hoàn tất.");
    }
}

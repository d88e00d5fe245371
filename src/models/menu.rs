use serde::{Deserialize, Serialize};

/// Top-level shape of `menus.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuData {
    #[serde(default)]
    pub main_menu: Vec<MenuItem>,
    #[serde(default)]
    pub footer_menu: FooterMenu,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_external: String,
    #[serde(default)]
    pub has_dropdown: bool,
    #[serde(default)]
    pub submenu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterMenu {
    #[serde(default)]
    pub links: Vec<MenuItem>,
    #[serde(default)]
    pub activities: Vec<MenuItem>,
}

impl MenuItem {
    /// Whether this top-level entry should be highlighted for the request
    /// path. The gallery entry owns the gallery page, the services entry
    /// owns both campaign pages, home owns the site root.
    pub fn is_active(&self, current_path: &str) -> bool {
        match self.id.as_str() {
            "gallery" => current_path.starts_with("/gallery"),
            "services" => is_campaign_path(current_path),
            "home" => current_path == "/" || current_path == "/index.html",
            _ => false,
        }
    }

    /// Whether a dropdown child should be highlighted. Only the charity
    /// submenu entry has an active state of its own.
    pub fn is_submenu_active(&self, current_path: &str) -> bool {
        self.id == "charity" && is_campaign_path(current_path)
    }

    /// Link target for the current page: internal URL on the site root,
    /// the external variant elsewhere (mirrors how the menu document keeps
    /// both forms). An empty external URL falls back to the internal one.
    pub fn href(&self, on_root_page: bool) -> &str {
        if on_root_page || self.url_external.trim().is_empty() {
            &self.url
        } else {
            &self.url_external
        }
    }
}

fn is_campaign_path(path: &str) -> bool {
    path.starts_with("/campaigns") || path.starts_with("/campaign")
}

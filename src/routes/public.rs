use log::{error, warn};
use rocket::response::content::RawHtml;
use rocket::State;

use crate::config::SiteConfig;
use crate::data;
use crate::flipbook::Flipbook;
use crate::models::campaign::{Campaign, CampaignStatus, StatusFilter};
use crate::models::menu::MenuData;
use crate::render::{self, PageContext};

/// Menu data for the current request, or `None` to fall back to the static
/// markup.
fn load_menu(cfg: &SiteConfig) -> Option<MenuData> {
    match data::load_menus(&cfg.data_dir()) {
        Ok(menu) => Some(menu),
        Err(e) => {
            warn!("menu không tải được, dùng menu tĩnh: {}", e);
            None
        }
    }
}

// ── Homepage ───────────────────────────────────────────

#[get("/")]
pub fn homepage(cfg: &State<SiteConfig>) -> RawHtml<String> {
    let menu = load_menu(cfg);

    // Active campaigns get a strip on the landing page; a load failure
    // just hides the strip.
    let campaigns = data::load_campaigns(&cfg.data_dir()).unwrap_or_else(|e| {
        error!("trang chủ: {}", e);
        Vec::new()
    });
    let active = Campaign::listing(&campaigns, StatusFilter::Only(CampaignStatus::Active));

    let mut body = format!(
        "<section class=\"home-hero\">\
         \n<h1>{}</h1>\
         \n<p>Trang thông tin hoạt động từ thiện và thư viện hình ảnh của chùa.</p>\
         \n<div class=\"home-links\">\
         <a href=\"/campaigns\" class=\"btn btn-primary\">Chiến dịch từ thiện</a>\
         <a href=\"/gallery\" class=\"btn btn-secondary\">Thư viện ảnh</a>\
         </div>\
         \n</section>",
        render::html_escape(&cfg.site_name),
    );
    let mut notices = Vec::new();
    if !active.is_empty() {
        let (strip, strip_notices) = render::build_campaign_list(&active, StatusFilter::All);
        body.push('\n');
        body.push_str(&strip);
        body.push_str(&render::build_donation_modal(cfg, None));
        notices = strip_notices;
    }

    let page = PageContext {
        cfg,
        menu: menu.as_ref(),
        current_path: "/",
        title: "",
        description: "",
    };
    RawHtml(render::render_page(&page, &body, &notices))
}

// ── Campaign list ──────────────────────────────────────

#[get("/campaigns?<status>")]
pub fn campaign_list(cfg: &State<SiteConfig>, status: Option<String>) -> RawHtml<String> {
    let menu = load_menu(cfg);
    let filter = StatusFilter::from_query(status.as_deref());

    let campaigns = match data::load_campaigns(&cfg.data_dir()) {
        Ok(campaigns) => campaigns,
        Err(e) => {
            // Same user-visible outcome as an empty collection.
            error!("danh sách chiến dịch không tải được: {}", e);
            Vec::new()
        }
    };
    let listed = Campaign::listing(&campaigns, filter);

    let (mut body, notices) = render::build_campaign_list(&listed, filter);
    if listed.iter().any(|c| c.status == CampaignStatus::Active) {
        body.push_str(&render::build_donation_modal(cfg, None));
    }

    let page = PageContext {
        cfg,
        menu: menu.as_ref(),
        current_path: "/campaigns",
        title: "Chiến dịch từ thiện",
        description: "Các chiến dịch từ thiện đang kêu gọi và đã hoàn thành.",
    };
    RawHtml(render::render_page(&page, &body, &notices))
}

// ── Campaign detail ────────────────────────────────────

#[get("/campaign?<id>")]
pub fn campaign_detail(cfg: &State<SiteConfig>, id: Option<String>) -> RawHtml<String> {
    let menu = load_menu(cfg);

    // Absent id, load failure and unknown id all resolve to the same
    // not-found rendering.
    let campaign = id.as_deref().and_then(|wanted| {
        match data::load_campaigns(&cfg.data_dir()) {
            Ok(campaigns) => Campaign::find(&campaigns, wanted).cloned(),
            Err(e) => {
                error!("chi tiết chiến dịch không tải được: {}", e);
                None
            }
        }
    });

    let (body, notices, title, description) = match &campaign {
        Some(campaign) => {
            let (body, notices) = render::build_campaign_detail(campaign, cfg);
            (
                body,
                notices,
                campaign.title.clone(),
                campaign.description.clone(),
            )
        }
        None => (
            render::build_not_found(),
            Vec::new(),
            "Không tìm thấy chiến dịch".to_string(),
            String::new(),
        ),
    };

    let page = PageContext {
        cfg,
        menu: menu.as_ref(),
        current_path: "/campaign",
        title: &title,
        description: &description,
    };
    RawHtml(render::render_page(&page, &body, &notices))
}

// ── Gallery ────────────────────────────────────────────

#[get("/gallery?<page>")]
pub fn gallery(cfg: &State<SiteConfig>, page: Option<usize>) -> RawHtml<String> {
    let menu = load_menu(cfg);

    let body = match data::load_gallery(&cfg.data_dir()) {
        Ok(images) => {
            let mut book = Flipbook::new(images);
            // The query parameter is the 1-based display value; walk there
            // through ordinary turns so the boundary rules apply.
            if let Some(requested) = page {
                book.goto(requested.saturating_sub(1));
            }
            render::build_gallery(cfg, &book)
        }
        Err(e) => {
            error!("thư viện ảnh không tải được: {}", e);
            render::build_gallery_error()
        }
    };

    let page = PageContext {
        cfg,
        menu: menu.as_ref(),
        current_path: "/gallery",
        title: "Thư viện hình ảnh",
        description: "Hình ảnh hoạt động của chùa.",
    };
    RawHtml(render::render_page(&page, &body, &[]))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, campaign_list, campaign_detail, gallery]
}

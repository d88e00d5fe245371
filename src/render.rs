//! HTML builders for every public page. Markup is assembled with plain
//! string formatting; every untrusted value passes through `html_escape`
//! on its way in.

use url::form_urlencoded;

use crate::config::{DonationConfig, SiteConfig};
use crate::flipbook::{Direction, Flipbook, Page, PageFlag, SETTLE_MS};
use crate::lightbox::{self, RenderNotice};
use crate::models::campaign::{Campaign, CampaignStatus, DetailedInfo, StatusFilter};
use crate::models::menu::{MenuData, MenuItem};

/// Fixed third-party endpoint that renders donation QR images. This display
/// path builds the URL by hand and does not go through the vietqr client.
pub const QR_IMAGE_BASE: &str = "https://img.vietqr.io/image";

// ── Page shell ─────────────────────────────────────────

pub struct PageContext<'a> {
    pub cfg: &'a SiteConfig,
    pub menu: Option<&'a MenuData>,
    pub current_path: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

/// Assemble a full document around a rendered body: head with meta tags,
/// header with navigation, footer, and any decorations requested through
/// the render notices.
pub fn render_page(page: &PageContext, body: &str, notices: &[RenderNotice]) -> String {
    let site_name = &page.cfg.site_name;
    let full_title = if page.title.is_empty() {
        site_name.clone()
    } else {
        format!("{} | {}", page.title, site_name)
    };

    let mut meta = String::new();
    if !page.description.is_empty() {
        let desc = html_escape(page.description);
        let title = html_escape(if page.title.is_empty() {
            site_name.as_str()
        } else {
            page.title
        });
        meta.push_str(&format!(
            "\n    <meta name=\"description\" content=\"{desc}\">\
             \n    <meta property=\"og:title\" content=\"{title}\">\
             \n    <meta property=\"og:description\" content=\"{desc}\">\
             \n    <meta name=\"twitter:title\" content=\"{title}\">\
             \n    <meta name=\"twitter:description\" content=\"{desc}\">",
        ));
    }

    let mut html = format!(
        "<!DOCTYPE html>\
         \n<html lang=\"vi\">\
         \n<head>\
         \n    <meta charset=\"UTF-8\">\
         \n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
         \n    <title>{title}</title>{meta}\
         \n    <link rel=\"stylesheet\" href=\"/static/css/main.css\">\
         \n</head>\
         \n<body>\
         \n{header}\
         \n<main class=\"site-main\">\
         \n{body}\
         \n</main>\
         \n{footer}",
        title = html_escape(&full_title),
        meta = meta,
        header = build_header(page),
        body = body,
        footer = build_footer(page),
    );

    lightbox::decorate(&mut html, notices);
    html.push_str("\n</body>\n</html>\n");
    html
}

fn build_header(page: &PageContext) -> String {
    let nav = match page.menu {
        Some(menu) => build_main_menu(&menu.main_menu, page.current_path),
        None => fallback_menu(page.current_path),
    };
    format!(
        "<header class=\"site-header\">\
         \n    <div class=\"header-inner\">\
         \n        <a href=\"/\" class=\"site-brand\">{}</a>\
         \n        <nav class=\"site-nav\">{}</nav>\
         \n    </div>\
         \n</header>",
        html_escape(&page.cfg.site_name),
        nav,
    )
}

fn build_footer(page: &PageContext) -> String {
    let mut sections = String::new();
    if let Some(menu) = page.menu {
        sections.push_str(&build_footer_section(
            "Liên kết",
            &menu.footer_menu.links,
            page.current_path,
        ));
        sections.push_str(&build_footer_section(
            "Hoạt động",
            &menu.footer_menu.activities,
            page.current_path,
        ));
    }
    format!(
        "<footer class=\"site-footer\">\
         \n    <div class=\"footer-inner\">{}</div>\
         \n    <p class=\"footer-copyright\">&copy; {} {}</p>\
         \n</footer>",
        sections,
        chrono::Utc::now().format("%Y"),
        html_escape(&page.cfg.site_name),
    )
}

// ── Navigation menus ───────────────────────────────────

pub(crate) fn build_main_menu(items: &[MenuItem], current_path: &str) -> String {
    let on_root = current_path == "/";
    let mut html = String::from("<ul class=\"nav-menu\" id=\"navMenu\">");
    for item in items {
        let active = if item.is_active(current_path) { " active" } else { "" };
        if item.has_dropdown {
            html.push_str(&format!(
                "<li class=\"nav-item-dropdown\"><a href=\"{}\" class=\"nav-link{}\">{}</a><ul class=\"dropdown-menu\">",
                html_escape(item.href(on_root)),
                active,
                html_escape(&item.label),
            ));
            for sub in &item.submenu {
                let sub_active = if sub.is_submenu_active(current_path) {
                    " active"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "<li><a href=\"{}\" class=\"dropdown-link{}\">{}</a></li>",
                    html_escape(sub.href(on_root)),
                    sub_active,
                    html_escape(&sub.label),
                ));
            }
            html.push_str("</ul></li>");
        } else {
            html.push_str(&format!(
                "<li><a href=\"{}\" class=\"nav-link{}\">{}</a></li>",
                html_escape(item.href(on_root)),
                active,
                html_escape(&item.label),
            ));
        }
    }
    html.push_str("</ul>");
    html
}

fn build_footer_section(heading: &str, items: &[MenuItem], current_path: &str) -> String {
    if items.is_empty() {
        return String::new();
    }
    let on_root = current_path == "/";
    let mut html = format!(
        "\n    <div class=\"footer-section\"><h4>{}</h4><ul class=\"footer-links\">",
        html_escape(heading)
    );
    for item in items {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            html_escape(item.href(on_root)),
            html_escape(&item.label),
        ));
    }
    html.push_str("</ul></div>");
    html
}

/// Static markup used when `menus.json` cannot be loaded.
pub(crate) fn fallback_menu(current_path: &str) -> String {
    let entries = [
        ("/", "Trang chủ"),
        ("/gallery", "Thư viện ảnh"),
        ("/campaigns", "Chiến dịch từ thiện"),
    ];
    let mut html = String::from("<ul class=\"nav-menu\" id=\"navMenu\">");
    for (href, label) in entries {
        let active = if current_path == href
            || (href != "/" && current_path.starts_with(href))
        {
            " active"
        } else {
            ""
        };
        html.push_str(&format!(
            "<li><a href=\"{}\" class=\"nav-link{}\">{}</a></li>",
            href, active, label
        ));
    }
    html.push_str("</ul>");
    html
}

// ── Campaign list ──────────────────────────────────────

/// Filter bar, campaign grid and empty-state region. Publishes a
/// campaign-images notice when at least one card was rendered.
pub fn build_campaign_list(
    campaigns: &[&Campaign],
    filter: StatusFilter,
) -> (String, Vec<RenderNotice>) {
    let mut html = format!(
        "<section class=\"campaigns-page\">\
         \n<h1 class=\"page-title\">Chiến dịch từ thiện</h1>\
         \n{}",
        build_filter_bar(filter)
    );

    if campaigns.is_empty() {
        html.push_str(
            "\n<div class=\"campaigns-grid\" id=\"campaignsGrid\"></div>\
             \n<div class=\"no-campaigns\" id=\"noCampaigns\">\
             <p>Hiện chưa có chiến dịch nào. Vui lòng quay lại sau.</p></div>\
             \n</section>",
        );
        return (html, Vec::new());
    }

    html.push_str("\n<div class=\"campaigns-grid\" id=\"campaignsGrid\">");
    for campaign in campaigns {
        html.push_str(&build_campaign_card(campaign));
    }
    html.push_str("</div>\n</section>");
    (html, vec![RenderNotice::CampaignImages])
}

fn build_filter_bar(filter: StatusFilter) -> String {
    let choices = [
        (StatusFilter::All, "Tất cả"),
        (StatusFilter::Only(CampaignStatus::Active), "Đang diễn ra"),
        (StatusFilter::Only(CampaignStatus::Pending), "Sắp diễn ra"),
        (StatusFilter::Only(CampaignStatus::Completed), "Đã hoàn thành"),
    ];
    let mut html = String::from("<div class=\"campaign-filters\">");
    for (choice, label) in choices {
        let active = if choice == filter { " active" } else { "" };
        html.push_str(&format!(
            "<a href=\"/campaigns?status={}\" class=\"filter-btn{}\" data-status=\"{}\">{}</a>",
            choice.query_value(),
            active,
            choice.query_value(),
            label,
        ));
    }
    html.push_str("</div>");
    html
}

fn build_campaign_card(campaign: &Campaign) -> String {
    let percentage = campaign.progress_percent();
    let donate = if campaign.status == CampaignStatus::Active {
        "<button class=\"btn btn-secondary\" onclick=\"openDonationModal()\">Đóng góp</button>"
    } else {
        ""
    };
    format!(
        "\n<div class=\"campaign-card\" data-status=\"{status}\">\
         \n    <div class=\"campaign-image\">\
         \n        <img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">\
         \n        <div class=\"campaign-status {status_class}\">{status_label}</div>\
         \n    </div>\
         \n    <div class=\"campaign-info\">\
         \n        <h3 class=\"campaign-title\">{title}</h3>\
         \n        <p class=\"campaign-description\">{short}</p>\
         \n        <div class=\"campaign-location\"><span class=\"icon\">📍</span><span>{location}</span></div>\
         \n        <div class=\"campaign-stats\">\
         \n            <div class=\"stat\"><span class=\"stat-icon\">👥</span>\
         <span class=\"stat-value\">{beneficiaries}</span>\
         <span class=\"stat-label\">người được hỗ trợ</span></div>\
         \n        </div>\
         \n        <div class=\"campaign-progress\">\
         \n            <div class=\"progress-header\"><span class=\"progress-label\">Đã đạt được</span>\
         <span class=\"progress-percentage\">{percentage}%</span></div>\
         \n            <div class=\"progress-bar\"><div class=\"progress-fill\" style=\"width: {percentage}%\"></div></div>\
         \n            <div class=\"progress-details\">\
         <span class=\"current-amount\">{current}</span>\
         <span class=\"target-amount\">/ {target}</span></div>\
         \n        </div>\
         \n        <div class=\"campaign-actions\">\
         <a href=\"/campaign?id={id}\" class=\"btn btn-primary\">Xem chi tiết</a>{donate}</div>\
         \n    </div>\
         \n</div>",
        status = status_token(campaign.status),
        status_class = campaign.status.css_class(),
        status_label = campaign.status.label(),
        image = html_escape(campaign.display_image()),
        title = html_escape(&campaign.title),
        short = html_escape(&campaign.short_description),
        location = html_escape(&campaign.location),
        beneficiaries = format_number(campaign.beneficiaries),
        percentage = percentage,
        current = format_currency(campaign.current_amount),
        target = format_currency(campaign.target_amount),
        id = urlencode(&campaign.id),
        donate = donate,
    )
}

fn status_token(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => "active",
        CampaignStatus::Pending => "pending",
        CampaignStatus::Completed => "completed",
    }
}

// ── Campaign detail ────────────────────────────────────

/// Full detail view: header, body sections, donation sidebar. Publishes a
/// campaign-images notice for the header image.
pub fn build_campaign_detail(campaign: &Campaign, cfg: &SiteConfig) -> (String, Vec<RenderNotice>) {
    let percentage = campaign.progress_percent();
    let dasharray = format!("{:.3}, 251.327", percentage as f64 * 2.51327);

    let activities: String = campaign
        .activities
        .iter()
        .map(|a| {
            format!(
                "<li class=\"activity-item\"><span class=\"activity-icon\">✓</span>\
                 <span class=\"activity-text\">{}</span></li>",
                html_escape(a)
            )
        })
        .collect();
    let highlights: String = campaign
        .highlights
        .iter()
        .map(|h| {
            format!(
                "<div class=\"highlight-card\"><span class=\"highlight-icon\">⭐</span>\
                 <p class=\"highlight-text\">{}</p></div>",
                html_escape(h)
            )
        })
        .collect();
    let detailed = campaign
        .detailed_info
        .as_ref()
        .map(build_detailed_info)
        .unwrap_or_default();

    let sidebar_action = if campaign.status == CampaignStatus::Active {
        format!(
            "<button class=\"btn btn-primary btn-block\" onclick=\"openDonationModal()\">💝 Đóng góp ngay</button>\
             \n<p class=\"donation-note\">Mọi đóng góp đều có ý nghĩa và được trân trọng</p>\
             \n{}",
            build_donation_modal(cfg, Some(&campaign.title)),
        )
    } else {
        "<div class=\"completed-badge\"><span class=\"completed-icon\">✓</span>\
         <span class=\"completed-text\">Chiến dịch đã hoàn thành</span></div>"
            .to_string()
    };

    let remaining = if campaign.status == CampaignStatus::Active {
        format!(
            "<div class=\"amount-item\"><span class=\"amount-label\">Còn thiếu</span>\
             <span class=\"amount-value remaining\">{}</span></div>",
            format_currency(campaign.remaining_amount())
        )
    } else {
        String::new()
    };

    let html = format!(
        "<article class=\"campaign-detail\" id=\"campaignContent\">\
         \n<div class=\"campaign-header\">\
         \n    <div class=\"campaign-header-image\">\
         \n        <img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">\
         \n        <div class=\"campaign-status-badge {status_class}\">{status_label}</div>\
         \n    </div>\
         \n    <div class=\"campaign-header-info\">\
         \n        <h1 class=\"campaign-detail-title\">{title}</h1>\
         \n        <p class=\"campaign-detail-description\">{description}</p>\
         \n        <div class=\"campaign-meta\">\
         \n            <div class=\"meta-item\"><span class=\"meta-icon\">📍</span>\
         <div class=\"meta-content\"><span class=\"meta-label\">Địa điểm</span>\
         <span class=\"meta-value\">{location}</span></div></div>\
         \n            <div class=\"meta-item\"><span class=\"meta-icon\">📅</span>\
         <div class=\"meta-content\"><span class=\"meta-label\">Thời gian</span>\
         <span class=\"meta-value\">{start} - {end}</span></div></div>\
         \n            <div class=\"meta-item\"><span class=\"meta-icon\">👥</span>\
         <div class=\"meta-content\"><span class=\"meta-label\">Người thụ hưởng</span>\
         <span class=\"meta-value\">{beneficiaries} người</span></div></div>\
         \n        </div>\
         \n    </div>\
         \n</div>\
         \n<div class=\"campaign-body\">\
         \n<div class=\"campaign-main\">\
         \n    <div class=\"campaign-section\">\
         \n        <h2 class=\"section-heading\">Các hoạt động trong chiến dịch</h2>\
         \n        <ul class=\"activity-list\">{activities}</ul>\
         \n    </div>\
         \n    <div class=\"campaign-section\">\
         \n        <h2 class=\"section-heading\">Điểm nổi bật</h2>\
         \n        <div class=\"highlights-grid\">{highlights}</div>\
         \n    </div>\
         \n{detailed}\
         \n</div>\
         \n<aside class=\"campaign-sidebar\">\
         \n    <div class=\"donation-card\">\
         \n        <h3 class=\"donation-card-title\">Tiến độ quyên góp</h3>\
         \n        <div class=\"campaign-progress-detail\">\
         \n            <div class=\"progress-circle\">\
         \n                <svg viewBox=\"0 0 100 100\">\
         \n                    <circle cx=\"50\" cy=\"50\" r=\"40\" class=\"progress-circle-bg\" />\
         \n                    <circle cx=\"50\" cy=\"50\" r=\"40\" class=\"progress-circle-fill\" style=\"stroke-dasharray: {dasharray}\" />\
         \n                </svg>\
         \n                <div class=\"progress-circle-text\"><span class=\"progress-circle-percentage\">{percentage}%</span></div>\
         \n            </div>\
         \n            <div class=\"progress-amounts\">\
         \n                <div class=\"amount-item\"><span class=\"amount-label\">Đã quyên góp</span>\
         <span class=\"amount-value current\">{current}</span></div>\
         \n                <div class=\"amount-item\"><span class=\"amount-label\">Mục tiêu</span>\
         <span class=\"amount-value target\">{target}</span></div>\
         \n                {remaining}\
         \n            </div>\
         \n        </div>\
         \n        {sidebar_action}\
         \n    </div>\
         \n    <div class=\"share-card\">\
         \n        <h3 class=\"share-card-title\">Chia sẻ chiến dịch</h3>\
         \n        <p class=\"share-card-description\">Hãy chia sẻ để nhiều người biết đến và cùng chung tay</p>\
         \n        <div class=\"share-buttons\">\
         \n            <button class=\"share-btn facebook\" onclick=\"shareOnFacebook()\"><span class=\"share-icon\">f</span> Facebook</button>\
         \n            <button class=\"share-btn copy\" onclick=\"copyLink()\"><span class=\"share-icon\">🔗</span> Sao chép link</button>\
         \n        </div>\
         \n    </div>\
         \n</aside>\
         \n</div>\
         \n</article>\
         \n{share_script}",
        image = html_escape(campaign.display_image()),
        title = html_escape(&campaign.title),
        status_class = campaign.status.css_class(),
        status_label = campaign.status.label(),
        description = html_escape(&campaign.description),
        location = html_escape(&campaign.location),
        start = format_date(&campaign.start_date),
        end = format_date(&campaign.end_date),
        beneficiaries = format_number(campaign.beneficiaries),
        activities = activities,
        highlights = highlights,
        detailed = detailed,
        dasharray = dasharray,
        percentage = percentage,
        current = format_currency(campaign.current_amount),
        target = format_currency(campaign.target_amount),
        remaining = remaining,
        sidebar_action = sidebar_action,
        share_script = SHARE_SCRIPT,
    );

    (html, vec![RenderNotice::CampaignImages])
}

fn build_detailed_info(info: &DetailedInfo) -> String {
    let mut html = String::new();

    if let Some(general) = &info.general_info {
        let rows = [
            ("Đơn vị tổ chức:", &general.organizer),
            ("Địa chỉ chùa:", &general.temple_address),
            ("Người đại diện:", &general.representative),
            ("Thời gian gây quỹ:", &general.fundraising_period),
            ("Thời gian dự kiến đi cứu trợ:", &general.relief_trip_date),
        ];
        html.push_str(
            "<div class=\"campaign-section detailed-info-section\">\
             \n<h2 class=\"section-heading\">📋 Thông tin chung về chiến dịch</h2>\
             \n<div class=\"info-table\">",
        );
        for (label, value) in rows {
            html.push_str(&format!(
                "<div class=\"info-row\"><span class=\"info-label\">{}</span>\
                 <span class=\"info-value\">{}</span></div>",
                label,
                html_escape(value),
            ));
        }
        html.push_str("</div></div>");
    }

    if let Some(purpose) = &info.purpose_and_context {
        html.push_str(&format!(
            "<div class=\"campaign-section detailed-info-section\">\
             \n<h2 class=\"section-heading\">🎯 Mục đích và Bối cảnh</h2>\
             \n<div class=\"purpose-context\">\
             <div class=\"context-block\"><h3 class=\"block-title\">Bối cảnh</h3>\
             <p class=\"block-content\">{}</p></div>\
             <div class=\"context-block\"><h3 class=\"block-title\">Mục tiêu</h3>\
             <p class=\"block-content\">{}</p></div>\
             </div></div>",
            html_escape(&purpose.context),
            html_escape(&purpose.objective),
        ));
    }

    if !info.gift_package_details.is_empty() {
        html.push_str(
            "<div class=\"campaign-section detailed-info-section\">\
             \n<h2 class=\"section-heading\">🎁 Chi tiết các vật phẩm kêu gọi (Cho 1 phần quà)</h2>\
             \n<p class=\"section-description\">Chùa Kỳ Viên kêu gọi các nhà hảo tâm chung tay đóng góp tịnh tài và phẩm vật. Một phần quà dự kiến bao gồm:</p>\
             \n<div class=\"gift-package-table\"><table class=\"items-table\">\
             <thead><tr><th>Vật phẩm</th><th>Số lượng/phần</th><th>Tổng cộng</th></tr></thead><tbody>",
        );
        for item in &info.gift_package_details {
            html.push_str(&format!(
                "<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td></tr>",
                html_escape(&item.item),
                html_escape(&item.quantity),
                html_escape(&item.total),
            ));
        }
        html.push_str("</tbody></table></div></div>");
    }

    if let Some(contact) = &info.contact_info {
        html.push_str(
            "<div class=\"campaign-section detailed-info-section\">\
             \n<h2 class=\"section-heading\">📞 Phương thức đóng góp &amp; Liên hệ</h2>\
             \n<p class=\"section-description\">Để ủng hộ cho chiến dịch, quý mạnh thường quân có thể liên hệ qua các kênh sau:</p>\
             \n<div class=\"contact-methods\">",
        );
        if let Some(bank) = &contact.bank_transfer {
            html.push_str(&format!(
                "<div class=\"contact-block\"><h3 class=\"block-title\">💳 Chuyển khoản ngân hàng</h3>\
                 <div class=\"bank-details\">\
                 <div class=\"bank-detail-item\"><span class=\"detail-label\">Số tài khoản:</span>\
                 <span class=\"detail-value\">{}</span></div>\
                 <div class=\"bank-detail-item\"><span class=\"detail-label\">Ngân hàng:</span>\
                 <span class=\"detail-value\">{}</span></div>\
                 <div class=\"bank-detail-item\"><span class=\"detail-label\">Chủ tài khoản:</span>\
                 <span class=\"detail-value\">{}</span></div>\
                 </div></div>",
                html_escape(&bank.account_number),
                html_escape(&bank.bank),
                html_escape(&bank.account_holder),
            ));
        }
        if !contact.phone_numbers.is_empty() {
            html.push_str(
                "<div class=\"contact-block\"><h3 class=\"block-title\">📱 Số điện thoại liên hệ trực tiếp</h3>\
                 <div class=\"phone-list\">",
            );
            for phone in &contact.phone_numbers {
                let digits: String = phone.number.chars().filter(|c| c.is_ascii_digit()).collect();
                html.push_str(&format!(
                    "<div class=\"phone-item\"><span class=\"phone-name\">{}:</span>\
                     <a href=\"tel:{}\" class=\"phone-number\">{}</a></div>",
                    html_escape(&phone.name),
                    digits,
                    html_escape(&phone.number),
                ));
            }
            html.push_str("</div></div>");
        }
        html.push_str("</div></div>");
    }

    html
}

const SHARE_SCRIPT: &str = "<script>\
\nfunction shareOnFacebook(){\
\n    var url=encodeURIComponent(window.location.href);\
\n    window.open('https://www.facebook.com/sharer/sharer.php?u='+url,'_blank','width=600,height=400');\
\n}\
\nfunction copyLink(){\
\n    navigator.clipboard.writeText(window.location.href).then(function(){\
\n        showToast('Đã sao chép link vào clipboard!');\
\n    }).catch(function(){\
\n        showToast('Không thể sao chép link. Vui lòng thử lại.');\
\n    });\
\n}\
\nfunction showToast(message){\
\n    var existing=document.querySelector('.toast-notification');\
\n    if(existing)existing.remove();\
\n    var toast=document.createElement('div');\
\n    toast.className='toast-notification';\
\n    toast.textContent=message;\
\n    document.body.appendChild(toast);\
\n    setTimeout(function(){toast.classList.add('show');},10);\
\n    setTimeout(function(){\
\n        toast.classList.remove('show');\
\n        setTimeout(function(){toast.remove();},300);\
\n    },3000);\
\n}\
\n</script>";

/// Panel shown when the id parameter is absent or matches no record. The
/// regular content region is suppressed entirely.
pub fn build_not_found() -> String {
    "<section class=\"campaign-not-found\" id=\"campaignNotFound\">\
     \n    <h1>Không tìm thấy chiến dịch</h1>\
     \n    <p>Chiến dịch bạn tìm không tồn tại hoặc đã bị gỡ.</p>\
     \n    <a href=\"/campaigns\" class=\"btn btn-primary\">← Quay lại danh sách</a>\
     \n</section>"
        .to_string()
}

// ── Gallery flipbook ───────────────────────────────────

/// Flipbook markup: every synthesized page with its current flag, the
/// navigation controls, the page display, and the turn wiring. The wiring
/// drives button clicks and arrow keys through one pair of handlers with
/// the same settle-window semantics as the state machine.
pub fn build_gallery(cfg: &SiteConfig, book: &Flipbook) -> String {
    let flags = book.flags();
    // A turn caught mid-settle renders its animation class on the page
    // that is leaving.
    let turning_class = match book.turning() {
        Some(Direction::Forward) => " flipping-out",
        Some(Direction::Backward) => " flipping-in",
        None => "",
    };
    let mut pages_html = String::new();
    for (index, page) in book.pages().iter().enumerate() {
        let flag_class = match flags[index] {
            PageFlag::Flipped => " flipped".to_string(),
            PageFlag::Active => format!(" active{}", turning_class),
            PageFlag::Upcoming => String::new(),
        };
        match page {
            Page::Cover => pages_html.push_str(&format!(
                "\n    <div class=\"page cover-page{}\">\
                 <div class=\"page-content\">\
                 <h2>Thư Viện Hình Ảnh</h2>\
                 <p>{}</p>\
                 <p class=\"page-hint\">← → để lật trang</p>\
                 </div></div>",
                flag_class,
                html_escape(&cfg.site_name),
            )),
            Page::Image(image) => pages_html.push_str(&format!(
                "\n    <div class=\"page{}\">\
                 <div class=\"page-content\">\
                 <img src=\"{}\" alt=\"{}\" loading=\"lazy\" />\
                 <div class=\"page-caption\"><h3>{}</h3><p>{}</p></div>\
                 </div></div>",
                flag_class,
                html_escape(&image.src),
                html_escape(&image.alt),
                html_escape(&image.title),
                html_escape(&image.description),
            )),
            Page::BackCover => pages_html.push_str(&format!(
                "\n    <div class=\"page back-cover-page{}\">\
                 <div class=\"page-content\">\
                 <p>Cảm ơn bạn đã xem</p>\
                 <p class=\"emoji\">🛕</p>\
                 </div></div>",
                flag_class,
            )),
        }
    }

    // Anchor targets double as noscript navigation; the wiring intercepts
    // them for the animated flip.
    let (display_page, display_total) = book.page_display();
    let prev_target = book.current_page().max(1);
    let next_target = (book.current_page() + 2).min(display_total);
    format!(
        "<section class=\"gallery-page\">\
         \n<h1 class=\"page-title\">Thư viện hình ảnh</h1>\
         \n<div class=\"flipbook\" id=\"flipbook\">{pages}\
         \n</div>\
         \n<div class=\"flipbook-controls\">\
         \n    <a href=\"/gallery?page={prev_target}\" class=\"flip-btn\" id=\"prevBtn\" aria-label=\"Trang trước\">‹</a>\
         \n    <span class=\"page-display\" id=\"pageDisplay\">Trang {display_page} / {display_total}</span>\
         \n    <a href=\"/gallery?page={next_target}\" class=\"flip-btn\" id=\"nextBtn\" aria-label=\"Trang sau\">›</a>\
         \n</div>\
         \n</section>\
         \n{script}",
        pages = pages_html,
        prev_target = prev_target,
        display_page = display_page,
        display_total = display_total,
        next_target = next_target,
        script = gallery_script(),
    )
}

/// Inline error shown in place of the viewer when `images.json` cannot be
/// loaded. The state machine is never constructed on this path.
pub fn build_gallery_error() -> String {
    "<section class=\"gallery-page\">\
     \n<h1 class=\"page-title\">Thư viện hình ảnh</h1>\
     \n<p class=\"gallery-error-message\">Không thể tải thư viện hình ảnh. Vui lòng thử lại sau.</p>\
     \n</section>"
        .to_string()
}

fn gallery_script() -> String {
    format!(
        "<script>\
\n(function(){{\
\n'use strict';\
\nvar pages=Array.prototype.slice.call(document.querySelectorAll('#flipbook .page'));\
\nvar total=pages.length;\
\nvar current=0;\
\npages.forEach(function(p,i){{if(p.classList.contains('active'))current=i;}});\
\nvar turning=false;\
\nfunction show(i){{\
\n    pages.forEach(function(page,index){{\
\n        page.classList.remove('active','flipping-out','flipping-in');\
\n        if(index===i){{page.classList.add('active');page.classList.remove('flipped');}}\
\n        else if(index<i){{page.classList.add('flipped');}}\
\n        else{{page.classList.remove('flipped');}}\
\n    }});\
\n    var display=document.getElementById('pageDisplay');\
\n    if(display)display.textContent='Trang '+(i+1)+' / '+total;\
\n}}\
\nfunction nextPage(){{\
\n    if(turning||current>=total-1)return;\
\n    turning=true;\
\n    pages[current].classList.add('flipping-out');\
\n    setTimeout(function(){{current++;show(current);turning=false;}},{settle});\
\n}}\
\nfunction prevPage(){{\
\n    if(turning||current<=0)return;\
\n    turning=true;\
\n    pages[current].classList.add('flipping-in');\
\n    setTimeout(function(){{current--;show(current);turning=false;}},{settle});\
\n}}\
\ndocument.getElementById('prevBtn').addEventListener('click',function(e){{e.preventDefault();prevPage();}});\
\ndocument.getElementById('nextBtn').addEventListener('click',function(e){{e.preventDefault();nextPage();}});\
\ndocument.addEventListener('keydown',function(e){{\
\n    if(e.key==='ArrowLeft')prevPage();\
\n    if(e.key==='ArrowRight')nextPage();\
\n}});\
\n}})();\
\n</script>",
        settle = SETTLE_MS,
    )
}

// ── Donation modal & QR image ──────────────────────────

/// The QR image URL for the donation modal, built directly against the
/// image endpoint with its own parameter conventions. Deliberately not
/// routed through `vietqr::generate_qr`.
pub fn donation_qr_image_url(donation: &DonationConfig, add_info: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("accountName", &donation.account_name)
        .append_pair("addInfo", add_info)
        .finish();
    format!(
        "{}/{}-{}-{}.png?{}",
        QR_IMAGE_BASE, donation.bank_code, donation.account_number, donation.template, query
    )
}

/// Modal markup with the pre-filled QR image. The note composes the
/// campaign title with the organization name when a campaign is given.
pub fn build_donation_modal(cfg: &SiteConfig, campaign_title: Option<&str>) -> String {
    let note = match campaign_title {
        Some(title) => format!("{} - {}", title, cfg.site_name),
        None => cfg.site_name.clone(),
    };
    format!(
        "<div class=\"donation-modal\" id=\"donationModal\">\
         \n    <div class=\"donation-modal-content\">\
         \n        <button class=\"donation-modal-close\" onclick=\"closeDonationModal()\" aria-label=\"Close\">✕</button>\
         \n        <h3>Quét mã QR để đóng góp</h3>\
         \n        <p id=\"donationContent\">{note}</p>\
         \n        <img id=\"donationQRCode\" src=\"{qr}\" alt=\"Mã QR đóng góp\">\
         \n        <p class=\"donation-account\">{holder}</p>\
         \n    </div>\
         \n</div>\
         \n{script}",
        note = html_escape(&note),
        qr = html_escape(&donation_qr_image_url(&cfg.donation, &note)),
        holder = html_escape(&cfg.donation.account_name),
        script = MODAL_SCRIPT,
    )
}

const MODAL_SCRIPT: &str = "<script>\
\nfunction openDonationModal(){\
\n    var modal=document.getElementById('donationModal');\
\n    if(modal){modal.classList.add('show');document.body.style.overflow='hidden';}\
\n}\
\nfunction closeDonationModal(){\
\n    var modal=document.getElementById('donationModal');\
\n    if(modal){modal.classList.remove('show');document.body.style.overflow='';}\
\n}\
\n</script>";

// ── Helpers ────────────────────────────────────────────

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn urlencode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Group digits with dots the way vi-VN amounts are written.
pub(crate) fn format_number(n: i64) -> String {
    let negative = n < 0;
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// VND amount: grouped digits plus the currency sign.
pub(crate) fn format_currency(amount: i64) -> String {
    format!("{} ₫", format_number(amount))
}

/// ISO `YYYY-MM-DD` rendered as `dd/mm/yyyy`; anything unparseable passes
/// through trimmed.
pub(crate) fn format_date(iso: &str) -> String {
    match chrono::NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => iso.trim().to_string(),
    }
}

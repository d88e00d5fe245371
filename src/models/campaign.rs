use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a fundraising campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Pending,
    Completed,
}

impl CampaignStatus {
    /// Badge label shown on cards and the detail header.
    pub fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "Đang diễn ra",
            CampaignStatus::Pending => "Sắp diễn ra",
            CampaignStatus::Completed => "Đã hoàn thành",
        }
    }

    /// CSS class carried by the status badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "status-active",
            CampaignStatus::Pending => "status-pending",
            CampaignStatus::Completed => "status-completed",
        }
    }

    fn listing_rank(&self) -> u8 {
        match self {
            CampaignStatus::Active => 0,
            CampaignStatus::Pending => 1,
            CampaignStatus::Completed => 2,
        }
    }
}

/// One record of `charity-campaigns.json`. All text is untrusted and must be
/// escaped before it reaches markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub current_amount: i64,
    #[serde(default)]
    pub target_amount: i64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub beneficiaries: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub detailed_info: Option<DetailedInfo>,
}

/// Optional structured sections of the detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedInfo {
    #[serde(default)]
    pub general_info: Option<GeneralInfo>,
    #[serde(default)]
    pub purpose_and_context: Option<PurposeAndContext>,
    #[serde(default)]
    pub gift_package_details: Vec<GiftItem>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInfo {
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub temple_address: String,
    #[serde(default)]
    pub representative: String,
    #[serde(default)]
    pub fundraising_period: String,
    #[serde(default)]
    pub relief_trip_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurposeAndContext {
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub objective: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftItem {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub total: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub bank_transfer: Option<BankTransfer>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransfer {
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub account_holder: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
}

/// Listing filter carried in the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(CampaignStatus),
}

impl StatusFilter {
    /// Parse the query value; anything unrecognized means "all".
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("active") => StatusFilter::Only(CampaignStatus::Active),
            Some("pending") => StatusFilter::Only(CampaignStatus::Pending),
            Some("completed") => StatusFilter::Only(CampaignStatus::Completed),
            _ => StatusFilter::All,
        }
    }

    pub fn matches(&self, campaign: &Campaign) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => campaign.status == *status,
        }
    }

    /// Query value for the filter button markup.
    pub fn query_value(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(CampaignStatus::Active) => "active",
            StatusFilter::Only(CampaignStatus::Pending) => "pending",
            StatusFilter::Only(CampaignStatus::Completed) => "completed",
        }
    }
}

impl Campaign {
    pub fn find<'a>(campaigns: &'a [Campaign], id: &str) -> Option<&'a Campaign> {
        campaigns.iter().find(|c| c.id == id)
    }

    /// Filtered view in the fixed listing order: active campaigns first,
    /// then pending, then completed; newest start date first within a group.
    pub fn listing<'a>(campaigns: &'a [Campaign], filter: StatusFilter) -> Vec<&'a Campaign> {
        let mut out: Vec<&Campaign> = campaigns.iter().filter(|c| filter.matches(c)).collect();
        out.sort_by(|a, b| {
            a.status
                .listing_rank()
                .cmp(&b.status.listing_rank())
                .then_with(|| b.parsed_start_date().cmp(&a.parsed_start_date()))
        });
        out
    }

    /// Funding progress as a whole percentage. A missing or zero target
    /// reads as 0; overfunded campaigns are capped at 100 for display.
    pub fn progress_percent(&self) -> u32 {
        if self.target_amount <= 0 || self.current_amount <= 0 {
            return 0;
        }
        let pct = (self.current_amount as f64 / self.target_amount as f64 * 100.0).round();
        (pct as u32).min(100)
    }

    pub fn remaining_amount(&self) -> i64 {
        (self.target_amount - self.current_amount).max(0)
    }

    /// Card/header image: explicit imageUrl override wins over the image
    /// reference.
    pub fn display_image(&self) -> &str {
        match &self.image_url {
            Some(url) if !url.trim().is_empty() => url.trim(),
            _ => self.image.trim(),
        }
    }

    fn parsed_start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").ok()
    }
}

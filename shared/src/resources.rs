//! Typed records for every collection the dashboard reads.
//!
//! Optional backend fields are `Option`/`#[serde(default)]` so a sparse
//! response still decodes; views never fall back to ad-hoc defaults.

use crate::{RecordId, Resource, Writable};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =========================================================
// SEO
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSite {
    pub id: RecordId,
    pub domain: String,
    #[serde(default)]
    pub sitemaps_url: Option<String>,
    #[serde(default)]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for SeoSite {
    const PATH: &'static str = "/api/seo/sites/";
    const LABEL: &'static str = "SEO sites";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSiteDraft {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemaps_url: Option<String>,
    pub default_locale: String,
}

impl Writable for SeoSite {
    type Draft = SeoSiteDraft;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeoKeywordCluster {
    pub id: RecordId,
    pub keyword: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub search_volume: Option<u64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

impl Resource for SeoKeywordCluster {
    const PATH: &'static str = "/api/seo/keywords/";
    const LABEL: &'static str = "SEO keywords";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// ASO
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsoApp {
    pub id: RecordId,
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Resource for AsoApp {
    const PATH: &'static str = "/api/aso/apps/";
    const LABEL: &'static str = "ASO apps";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsoAppDraft {
    pub name: String,
    pub platform: String,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl Writable for AsoApp {
    type Draft = AsoAppDraft;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AsoKeyword {
    pub id: RecordId,
    pub keyword: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub search_volume: Option<u64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

impl Resource for AsoKeyword {
    const PATH: &'static str = "/api/aso/keywords/";
    const LABEL: &'static str = "ASO keywords";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AsoListing {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Resource for AsoListing {
    const PATH: &'static str = "/api/aso/listings/";
    const LABEL: &'static str = "ASO listings";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Marketplace
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceProduct {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub pricing_type: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

impl Resource for MarketplaceProduct {
    const PATH: &'static str = "/api/marketplace/products/";
    const LABEL: &'static str = "Marketplace products";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub pricing_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

impl Writable for MarketplaceProduct {
    type Draft = ProductDraft;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceReview {
    pub id: RecordId,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Resource for MarketplaceReview {
    const PATH: &'static str = "/api/marketplace/reviews/";
    const LABEL: &'static str = "Marketplace reviews";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceOrder {
    pub id: RecordId,
    pub status: String,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for MarketplaceOrder {
    const PATH: &'static str = "/api/marketplace/orders/";
    const LABEL: &'static str = "Marketplace orders";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

/// A product bookmarked by the tenant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceSaved {
    pub id: RecordId,
    #[serde(default)]
    pub product_id: Option<RecordId>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub product_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

impl Resource for MarketplaceSaved {
    const PATH: &'static str = "/api/marketplace/saved/";
    const LABEL: &'static str = "Saved products";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceConversation {
    pub id: RecordId,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub message_count: Option<u64>,
    /// Timestamp of the latest message.
    #[serde(default)]
    pub last_message: Option<String>,
}

impl Resource for MarketplaceConversation {
    const PATH: &'static str = "/api/marketplace/conversations/";
    const LABEL: &'static str = "Marketplace conversations";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceMessage {
    pub id: RecordId,
    #[serde(default)]
    pub conversation_id: Option<RecordId>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_read: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for MarketplaceMessage {
    const PATH: &'static str = "/api/marketplace/messages/";
    const LABEL: &'static str = "Marketplace messages";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Social
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    #[default]
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Tiktok,
    #[serde(other)]
    Other,
}

impl SocialPlatform {
    pub const SELECTABLE: [SocialPlatform; 5] = [
        SocialPlatform::Twitter,
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Linkedin,
        SocialPlatform::Tiktok,
    ];

    /// Longest post body the channel accepts, in characters.
    pub fn char_limit(&self) -> usize {
        match self {
            SocialPlatform::Twitter => 280,
            _ => 5000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "twitter" => SocialPlatform::Twitter,
            "facebook" => SocialPlatform::Facebook,
            "instagram" => SocialPlatform::Instagram,
            "linkedin" => SocialPlatform::Linkedin,
            "tiktok" => SocialPlatform::Tiktok,
            _ => SocialPlatform::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialAccount {
    pub id: RecordId,
    pub platform: SocialPlatform,
    pub username: String,
}

impl Resource for SocialAccount {
    const PATH: &'static str = "/api/social/accounts/";
    const LABEL: &'static str = "Social accounts";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: RecordId,
    pub content: String,
    pub platform: SocialPlatform,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

impl Resource for SocialPost {
    const PATH: &'static str = "/api/social/posts/";
    const LABEL: &'static str = "Social posts";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPostDraft {
    pub content: String,
    pub platform: SocialPlatform,
    pub scheduled_time: Option<NaiveDateTime>,
}

impl Writable for SocialPost {
    type Draft = SocialPostDraft;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialComment {
    pub id: RecordId,
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Resource for SocialComment {
    const PATH: &'static str = "/api/social/comments/";
    const LABEL: &'static str = "Social comments";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

/// Per-post engagement counters reported by a channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialEngagement {
    pub id: RecordId,
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub impressions: Option<u64>,
}

impl Resource for SocialEngagement {
    const PATH: &'static str = "/api/social/engagement/";
    const LABEL: &'static str = "Social engagement";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialMessage {
    pub id: RecordId,
    #[serde(default)]
    pub conversation_id: Option<RecordId>,
    #[serde(default)]
    pub sender_id: Option<RecordId>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Resource for SocialMessage {
    const PATH: &'static str = "/api/social/messages/";
    const LABEL: &'static str = "Social messages";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Email
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: RecordId,
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub content: String,
}

impl Resource for EmailTemplate {
    const PATH: &'static str = "/api/email/templates/";
    const LABEL: &'static str = "Email templates";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplateDraft {
    pub name: String,
    pub subject: String,
    pub content: String,
}

impl Writable for EmailTemplate {
    type Draft = EmailTemplateDraft;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailContact {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subscribed: Option<bool>,
}

impl Resource for EmailContact {
    const PATH: &'static str = "/api/email/contacts/";
    const LABEL: &'static str = "Email contacts";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailList {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
}

impl Resource for EmailList {
    const PATH: &'static str = "/api/email/lists/";
    const LABEL: &'static str = "Email lists";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailSend {
    pub id: RecordId,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub bounces: Option<u32>,
}

impl Resource for EmailSend {
    const PATH: &'static str = "/api/email/sends/";
    const LABEL: &'static str = "Email sends";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Analytics
// =========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsSite {
    pub id: RecordId,
    pub domain: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Resource for AnalyticsSite {
    const PATH: &'static str = "/api/analytics/sites/";
    const LABEL: &'static str = "Analytics sites";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageView {
    pub id: RecordId,
    pub url: String,
    #[serde(default)]
    pub site_domain: Option<String>,
    #[serde(default)]
    pub views: Option<u64>,
}

impl Resource for PageView {
    const PATH: &'static str = "/api/analytics/pageviews/";
    const LABEL: &'static str = "Page views";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Tenant
// =========================================================

/// A third-party service connected to the tenant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TenantIntegration {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default = "connected_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub connected_at: Option<String>,
}

fn connected_by_default() -> bool {
    true
}

impl TenantIntegration {
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Connected" } else { "Disconnected" }
    }
}

impl Resource for TenantIntegration {
    const PATH: &'static str = "/api/tenants/integrations/";
    const LABEL: &'static str = "Integrations";

    fn id(&self) -> RecordId {
        self.id.clone()
    }
}

// =========================================================
// Profile
// =========================================================

/// The signed-in user's profile. A singleton: every id maps to the same path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Resource for UserProfile {
    const PATH: &'static str = crate::PATH_PROFILE;
    const LABEL: &'static str = "Profile";

    fn id(&self) -> RecordId {
        self.id.clone().unwrap_or_else(|| RecordId::Str("me".into()))
    }

    fn item_path(_id: &RecordId) -> String {
        Self::PATH.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub location: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Writable for UserProfile {
    type Draft = ProfileUpdate;
}

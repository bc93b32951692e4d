//! Browser configurations for the dashboard modules.
//!
//! Every module pairs a tab enum with a record sum type so one generic
//! [`ResourceBrowser`](crate::browser::ResourceBrowser) can serve them all.

use crate::browser::{BrowserConfig, RecordRow, list_fetcher};
use crate::client::ResourceClient;
use crate::request::HttpClient;
use crate::session::KeyValueStorage;
use icycon_shared::{
    AnalyticsSite, AsoApp, AsoKeyword, AsoListing, EmailContact, EmailList, EmailSend,
    EmailTemplate, MarketplaceConversation, MarketplaceMessage, MarketplaceOrder,
    MarketplaceProduct, MarketplaceReview, MarketplaceSaved, PageView, RecordId, Resource,
    SeoKeywordCluster, SeoSite, SocialAccount, SocialComment, SocialEngagement, SocialMessage,
    SocialPost, TenantIntegration,
};
use std::fmt::Display;

const BLANK: &str = "-";

fn or_blank<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| BLANK.to_string())
}

fn text_or_blank(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(BLANK)
        .to_string()
}

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| BLANK.to_string())
}

/// Truncate to `max` characters for table cells.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

// =========================================================
// SEO
// =========================================================

pub mod seo {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Sites,
        Keywords,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Site(SeoSite),
        Keyword(SeoKeywordCluster),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Site(r) => r.id(),
                Record::Keyword(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Site(s) => vec![
                    s.domain.clone(),
                    text_or_blank(&s.default_locale),
                    text_or_blank(&s.sitemaps_url),
                    or_blank(s.rank),
                ],
                Record::Keyword(k) => vec![
                    k.keyword.clone(),
                    text_or_blank(&k.domain),
                    or_blank(k.search_volume),
                    or_blank(k.difficulty),
                ],
            }
        }

        fn location(&self) -> Option<(String, &'static str)> {
            match self {
                Record::Site(r) => Some((SeoSite::item_path(&r.id), SeoSite::LABEL)),
                _ => None,
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("SEO")
            .collection(
                Tab::Sites,
                "Sites",
                &["Domain", "Locale", "Sitemap", "Rank"],
                list_fetcher(client, Record::Site),
            )
            .creatable()
            .empty_message("No sites yet. Add your first site to start tracking.")
            .collection(
                Tab::Keywords,
                "Keywords",
                &["Keyword", "Site", "Volume", "Difficulty"],
                list_fetcher(client, Record::Keyword),
            )
            .empty_message("No keyword clusters yet.")
    }
}

// =========================================================
// ASO
// =========================================================

pub mod aso {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Apps,
        Keywords,
        Listings,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        App(AsoApp),
        Keyword(AsoKeyword),
        Listing(AsoListing),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::App(r) => r.id(),
                Record::Keyword(r) => r.id(),
                Record::Listing(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::App(a) => vec![
                    a.name.clone(),
                    a.platform.clone(),
                    text_or_blank(&a.app_id),
                    or_blank(a.rating),
                ],
                Record::Keyword(k) => vec![
                    k.keyword.clone(),
                    text_or_blank(&k.app_name),
                    or_blank(k.search_volume),
                    or_blank(k.difficulty),
                ],
                Record::Listing(l) => vec![
                    l.title.clone(),
                    text_or_blank(&l.app_name),
                    text_or_blank(&l.locale),
                ],
            }
        }

        fn location(&self) -> Option<(String, &'static str)> {
            match self {
                Record::App(r) => Some((AsoApp::item_path(&r.id), AsoApp::LABEL)),
                _ => None,
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("ASO")
            .collection(
                Tab::Apps,
                "Apps",
                &["Name", "Platform", "App ID", "Rating"],
                list_fetcher(client, Record::App),
            )
            .creatable()
            .empty_message("No apps yet. Add an app to start optimising.")
            .collection(
                Tab::Keywords,
                "Keywords",
                &["Keyword", "App", "Volume", "Difficulty"],
                list_fetcher(client, Record::Keyword),
            )
            .collection(
                Tab::Listings,
                "Listings",
                &["Title", "App", "Locale"],
                list_fetcher(client, Record::Listing),
            )
    }
}

// =========================================================
// Marketplace
// =========================================================

pub mod marketplace {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Products,
        Reviews,
        Orders,
        Saved,
        Conversations,
        Messages,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Product(MarketplaceProduct),
        Review(MarketplaceReview),
        Order(MarketplaceOrder),
        Saved(MarketplaceSaved),
        Conversation(MarketplaceConversation),
        Message(MarketplaceMessage),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Product(r) => r.id(),
                Record::Review(r) => r.id(),
                Record::Order(r) => r.id(),
                Record::Saved(r) => r.id(),
                Record::Conversation(r) => r.id(),
                Record::Message(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Product(p) => vec![
                    p.title.clone(),
                    p.category.clone(),
                    money(p.price),
                    text_or_blank(&p.pricing_type),
                    or_blank(p.rating),
                ],
                Record::Review(r) => vec![
                    text_or_blank(&r.product_title),
                    or_blank(r.rating),
                    text_or_blank(&r.title),
                    r.comment
                        .as_deref()
                        .map(|c| excerpt(c, 80))
                        .unwrap_or_else(|| BLANK.to_string()),
                ],
                Record::Order(o) => vec![
                    o.id.to_string(),
                    text_or_blank(&o.product_title),
                    o.status.clone(),
                    money(o.total),
                    text_or_blank(&o.created_at),
                ],
                Record::Saved(v) => vec![
                    text_or_blank(&v.product_title),
                    text_or_blank(&v.category),
                    money(v.product_price),
                    text_or_blank(&v.saved_at),
                ],
                Record::Conversation(c) => vec![
                    text_or_blank(&c.product_title),
                    format!("{} -> {}", text_or_blank(&c.buyer), text_or_blank(&c.seller)),
                    or_blank(c.message_count),
                    text_or_blank(&c.last_message),
                ],
                Record::Message(m) => vec![
                    text_or_blank(&m.sender),
                    excerpt(&m.content, 80),
                    text_or_blank(&m.created_at),
                ],
            }
        }

        fn location(&self) -> Option<(String, &'static str)> {
            match self {
                Record::Product(r) => Some((MarketplaceProduct::item_path(&r.id), MarketplaceProduct::LABEL)),
                _ => None,
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("Marketplace")
            .collection(
                Tab::Products,
                "Products",
                &["Title", "Category", "Price", "Pricing", "Rating"],
                list_fetcher(client, Record::Product),
            )
            .creatable()
            .empty_message("No products yet. Create your first product.")
            .collection(
                Tab::Reviews,
                "Reviews",
                &["Product", "Rating", "Title", "Comment"],
                list_fetcher(client, Record::Review),
            )
            .collection(
                Tab::Orders,
                "Orders",
                &["Order", "Product", "Status", "Total", "Placed"],
                list_fetcher(client, Record::Order),
            )
            .collection(
                Tab::Saved,
                "Saved",
                &["Product", "Category", "Price", "Saved"],
                list_fetcher(client, Record::Saved),
            )
            .empty_message("No saved products.")
            .collection(
                Tab::Conversations,
                "Conversations",
                &["Product", "Buyer -> Seller", "Messages", "Last message"],
                list_fetcher(client, Record::Conversation),
            )
            .collection(
                Tab::Messages,
                "Messages",
                &["From", "Message", "Sent"],
                list_fetcher(client, Record::Message),
            )
    }
}

// =========================================================
// Social
// =========================================================

pub mod social {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Posts,
        Accounts,
        Comments,
        Engagement,
        Messages,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Post(SocialPost),
        Account(SocialAccount),
        Comment(SocialComment),
        Engagement(SocialEngagement),
        Message(SocialMessage),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Post(r) => r.id(),
                Record::Account(r) => r.id(),
                Record::Comment(r) => r.id(),
                Record::Engagement(r) => r.id(),
                Record::Message(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Post(p) => vec![
                    p.platform.as_str().to_string(),
                    excerpt(&p.content, 60),
                    text_or_blank(&p.status),
                    text_or_blank(&p.scheduled_time),
                ],
                Record::Account(a) => vec![a.platform.as_str().to_string(), a.username.clone()],
                Record::Comment(c) => vec![
                    text_or_blank(&c.author),
                    text_or_blank(&c.post_title),
                    excerpt(&c.content, 80),
                ],
                Record::Engagement(e) => vec![
                    text_or_blank(&e.post_title),
                    text_or_blank(&e.platform),
                    e.likes.to_string(),
                    e.shares.to_string(),
                    e.comments.to_string(),
                ],
                Record::Message(m) => vec![
                    or_blank(m.sender_id.as_ref()),
                    excerpt(&m.content, 80),
                    text_or_blank(&m.timestamp),
                ],
            }
        }

        fn location(&self) -> Option<(String, &'static str)> {
            match self {
                Record::Post(r) => Some((SocialPost::item_path(&r.id), SocialPost::LABEL)),
                _ => None,
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("Social")
            .collection(
                Tab::Posts,
                "Posts",
                &["Platform", "Content", "Status", "Scheduled"],
                list_fetcher(client, Record::Post),
            )
            .creatable()
            .empty_message("No posts yet. Schedule your first post.")
            .collection(
                Tab::Accounts,
                "Accounts",
                &["Platform", "Username"],
                list_fetcher(client, Record::Account),
            )
            .empty_message("No connected accounts.")
            .collection(
                Tab::Comments,
                "Comments",
                &["Author", "Post", "Comment"],
                list_fetcher(client, Record::Comment),
            )
            .collection(
                Tab::Engagement,
                "Engagement",
                &["Post", "Platform", "Likes", "Shares", "Comments"],
                list_fetcher(client, Record::Engagement),
            )
            .collection(
                Tab::Messages,
                "Messages",
                &["From", "Message", "Received"],
                list_fetcher(client, Record::Message),
            )
    }
}

// =========================================================
// Email
// =========================================================

pub mod email {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Templates,
        Contacts,
        Lists,
        Sends,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Template(EmailTemplate),
        Contact(EmailContact),
        List(EmailList),
        Send(EmailSend),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Template(r) => r.id(),
                Record::Contact(r) => r.id(),
                Record::List(r) => r.id(),
                Record::Send(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Template(t) => vec![t.name.clone(), t.subject.clone()],
                Record::Contact(c) => vec![
                    c.email.clone(),
                    text_or_blank(&c.name),
                    match c.subscribed {
                        Some(true) => "Subscribed".to_string(),
                        Some(false) => "Unsubscribed".to_string(),
                        None => BLANK.to_string(),
                    },
                ],
                Record::List(l) => vec![l.name.clone(), or_blank(l.subscriber_count)],
                Record::Send(s) => vec![
                    text_or_blank(&s.template_name),
                    text_or_blank(&s.recipient_email),
                    text_or_blank(&s.status),
                    s.sent_at.clone().unwrap_or_else(|| "N/A".to_string()),
                ],
            }
        }

        fn location(&self) -> Option<(String, &'static str)> {
            match self {
                Record::Template(r) => Some((EmailTemplate::item_path(&r.id), EmailTemplate::LABEL)),
                _ => None,
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("Email")
            .collection(
                Tab::Templates,
                "Templates",
                &["Name", "Subject"],
                list_fetcher(client, Record::Template),
            )
            .creatable()
            .empty_message("No templates yet. Create your first template.")
            .collection(
                Tab::Contacts,
                "Contacts",
                &["Email", "Name", "Status"],
                list_fetcher(client, Record::Contact),
            )
            .collection(
                Tab::Lists,
                "Lists",
                &["Name", "Subscribers"],
                list_fetcher(client, Record::List),
            )
            .collection(
                Tab::Sends,
                "Sends",
                &["Template", "Recipient", "Status", "Sent"],
                list_fetcher(client, Record::Send),
            )
            .empty_message("No emails sent yet.")
    }
}

// =========================================================
// Analytics
// =========================================================

pub mod analytics {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Sites,
        PageViews,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Site(AnalyticsSite),
        PageView(PageView),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Site(r) => r.id(),
                Record::PageView(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Site(s) => vec![s.domain.clone(), text_or_blank(&s.name)],
                Record::PageView(p) => vec![
                    p.url.clone(),
                    text_or_blank(&p.site_domain),
                    or_blank(p.views),
                ],
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("Analytics")
            .collection(
                Tab::Sites,
                "Sites",
                &["Domain", "Name"],
                list_fetcher(client, Record::Site),
            )
            .collection(
                Tab::PageViews,
                "Page views",
                &["URL", "Site", "Views"],
                list_fetcher(client, Record::PageView),
            )
            .empty_message("No page views recorded yet.")
    }
}

// =========================================================
// Account
// =========================================================

pub mod account {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Tab {
        Integrations,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum Record {
        Integration(TenantIntegration),
    }

    impl RecordRow for Record {
        fn id(&self) -> RecordId {
            match self {
                Record::Integration(r) => r.id(),
            }
        }

        fn cells(&self) -> Vec<String> {
            match self {
                Record::Integration(i) => vec![
                    i.name.clone(),
                    text_or_blank(&i.service),
                    i.status_label().to_string(),
                ],
            }
        }
    }

    pub fn config<C, S>(client: &ResourceClient<C, S>) -> BrowserConfig<Tab, Record>
    where
        C: HttpClient + Clone + 'static,
        S: KeyValueStorage + Clone + 'static,
    {
        BrowserConfig::new("Integrations")
            .collection(
                Tab::Integrations,
                "Integrations",
                &["Name", "Service", "Status"],
                list_fetcher(client, Record::Integration),
            )
            .empty_message("No integrations found.")
    }
}

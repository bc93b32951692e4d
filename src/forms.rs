//! Editable form state for every dialog.
//!
//! Inputs are held as raw strings exactly as typed so a failed submission
//! never loses them. Conversion to a typed draft happens in one place,
//! [`RecordForm::to_draft`], which runs all client-side checks.

use crate::error::ValidationError;
use crate::validation::{
    matching, max_chars, optional, password_strength, positive_number, required,
};
use chrono::{NaiveDate, NaiveDateTime};
use icycon_shared::{
    AsoApp, AsoAppDraft, ChangeEmailRequest, ChangePasswordRequest, EmailTemplate,
    EmailTemplateDraft, ExportFormat, ExportRequest, MarketplaceProduct, ProductDraft, ProfileUpdate, SeoSite, SeoSiteDraft,
    SignupRequest, SocialPlatform, SocialPost, SocialPostDraft, UserProfile, Writable,
};

// =========================================================
// Field descriptors
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    TextArea,
    Number,
    /// `(value, label)` pairs.
    Select(&'static [(&'static str, &'static str)]),
    /// `datetime-local` input, `YYYY-MM-DDTHH:MM`.
    DateTime,
    /// `date` input, `YYYY-MM-DD`.
    Date,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// String-keyed access for generic rendering.
pub trait FormFields: Clone + Default + 'static {
    fn fields() -> &'static [FieldSpec];
    /// Unknown names read as empty.
    fn get(&self, field: &str) -> String;
    /// Unknown names are ignored.
    fn set(&mut self, field: &str, value: String);

    /// Extra text shown under an input, such as a live character counter.
    fn hint(&self, _field: &str) -> Option<String> {
        None
    }
}

/// A form that creates or edits one [`Writable`] record.
pub trait RecordForm: FormFields {
    type Record: Writable;
    /// Singular noun for dialog titles ("Create Site").
    const NOUN: &'static str;

    fn from_record(record: &Self::Record) -> Self;
    fn to_draft(&self) -> Result<<Self::Record as Writable>::Draft, ValidationError>;
}

macro_rules! impl_form_fields {
    ($form:ty, $specs:expr, [$($name:ident),* $(,)?]) => {
        impl FormFields for $form {
            fn fields() -> &'static [FieldSpec] {
                $specs
            }

            fn get(&self, field: &str) -> String {
                match field {
                    $(stringify!($name) => self.$name.clone(),)*
                    _ => String::new(),
                }
            }

            fn set(&mut self, field: &str, value: String) {
                match field {
                    $(stringify!($name) => self.$name = value,)*
                    _ => tracing::warn!(field, "ignoring unknown form field"),
                }
            }
        }
    };
}

fn number_text(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

// =========================================================
// SEO site
// =========================================================

pub const LOCALES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
];

const SEO_SITE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("domain", "Domain", FieldKind::Text).required(),
    FieldSpec::new("sitemaps_url", "Sitemap URL", FieldKind::Url),
    FieldSpec::new("default_locale", "Default locale", FieldKind::Select(LOCALES)),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SeoSiteForm {
    pub domain: String,
    pub sitemaps_url: String,
    pub default_locale: String,
}

impl Default for SeoSiteForm {
    fn default() -> Self {
        Self {
            domain: String::new(),
            sitemaps_url: String::new(),
            default_locale: "en".to_string(),
        }
    }
}

impl_form_fields!(SeoSiteForm, &SEO_SITE_FIELDS, [domain, sitemaps_url, default_locale]);

impl RecordForm for SeoSiteForm {
    type Record = SeoSite;
    const NOUN: &'static str = "Site";

    fn from_record(site: &SeoSite) -> Self {
        Self {
            domain: site.domain.clone(),
            sitemaps_url: site.sitemaps_url.clone().unwrap_or_default(),
            default_locale: site
                .default_locale
                .clone()
                .unwrap_or_else(|| "en".to_string()),
        }
    }

    fn to_draft(&self) -> Result<SeoSiteDraft, ValidationError> {
        Ok(SeoSiteDraft {
            domain: required("domain", "Domain", &self.domain)?,
            sitemaps_url: optional(&self.sitemaps_url),
            default_locale: optional(&self.default_locale).unwrap_or_else(|| "en".to_string()),
        })
    }
}

// =========================================================
// ASO app
// =========================================================

pub const APP_PLATFORMS: &[(&str, &str)] =
    &[("ios", "iOS"), ("android", "Android"), ("both", "Both")];

const ASO_APP_FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("name", "App name", FieldKind::Text).required(),
    FieldSpec::new("platform", "Platform", FieldKind::Select(APP_PLATFORMS)),
    FieldSpec::new("app_id", "App ID", FieldKind::Text).required(),
    FieldSpec::new("icon_url", "Icon URL", FieldKind::Url),
];

#[derive(Debug, Clone, PartialEq)]
pub struct AsoAppForm {
    pub name: String,
    pub platform: String,
    pub app_id: String,
    pub icon_url: String,
}

impl Default for AsoAppForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            platform: "ios".to_string(),
            app_id: String::new(),
            icon_url: String::new(),
        }
    }
}

impl_form_fields!(AsoAppForm, &ASO_APP_FIELDS, [name, platform, app_id, icon_url]);

impl RecordForm for AsoAppForm {
    type Record = AsoApp;
    const NOUN: &'static str = "App";

    fn from_record(app: &AsoApp) -> Self {
        Self {
            name: app.name.clone(),
            platform: app.platform.clone(),
            app_id: app.app_id.clone().unwrap_or_default(),
            icon_url: app.icon_url.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> Result<AsoAppDraft, ValidationError> {
        Ok(AsoAppDraft {
            name: required("name", "App name", &self.name)?,
            platform: self.platform.clone(),
            app_id: required("app_id", "App ID", &self.app_id)?,
            icon_url: optional(&self.icon_url),
        })
    }
}

// =========================================================
// Marketplace product
// =========================================================

pub const PRODUCT_CATEGORIES: &[(&str, &str)] = &[
    ("", "Select a category"),
    ("templates", "Templates"),
    ("tools", "Tools"),
    ("plugins", "Plugins"),
    ("guides", "Guides"),
    ("courses", "Courses"),
];

pub const PRICING_TYPES: &[(&str, &str)] = &[
    ("one-time", "One-time Purchase"),
    ("subscription", "Subscription"),
    ("freemium", "Freemium"),
];

const PRODUCT_FIELDS: [FieldSpec; 6] = [
    FieldSpec::new("title", "Product title", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::TextArea),
    FieldSpec::new("category", "Category", FieldKind::Select(PRODUCT_CATEGORIES)).required(),
    FieldSpec::new("price", "Price", FieldKind::Number).required(),
    FieldSpec::new("pricing_type", "Pricing type", FieldKind::Select(PRICING_TYPES)),
    FieldSpec::new("featured_image", "Featured image URL", FieldKind::Url),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub pricing_type: String,
    pub featured_image: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            price: String::new(),
            pricing_type: "one-time".to_string(),
            featured_image: String::new(),
        }
    }
}

impl_form_fields!(
    ProductForm,
    &PRODUCT_FIELDS,
    [title, description, category, price, pricing_type, featured_image]
);

impl RecordForm for ProductForm {
    type Record = MarketplaceProduct;
    const NOUN: &'static str = "Product";

    fn from_record(product: &MarketplaceProduct) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: number_text(product.price),
            pricing_type: product
                .pricing_type
                .clone()
                .unwrap_or_else(|| "one-time".to_string()),
            featured_image: product.featured_image.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> Result<ProductDraft, ValidationError> {
        let title = required("title", "Product title", &self.title)?;
        let category = required("category", "Category", &self.category)?;
        let price = positive_number("price", "Price", &self.price)?;
        Ok(ProductDraft {
            title,
            description: self.description.trim().to_string(),
            category,
            price,
            pricing_type: self.pricing_type.clone(),
            featured_image: optional(&self.featured_image),
        })
    }
}

// =========================================================
// Social post
// =========================================================

pub const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("twitter", "Twitter"),
    ("facebook", "Facebook"),
    ("instagram", "Instagram"),
    ("linkedin", "LinkedIn"),
    ("tiktok", "TikTok"),
];

const SOCIAL_POST_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("platform", "Platform", FieldKind::Select(SOCIAL_PLATFORMS)),
    FieldSpec::new("content", "Post content", FieldKind::TextArea).required(),
    FieldSpec::new("scheduled_time", "Schedule for", FieldKind::DateTime),
];

const DATETIME_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq)]
pub struct SocialPostForm {
    pub content: String,
    pub platform: String,
    pub scheduled_time: String,
}

impl Default for SocialPostForm {
    fn default() -> Self {
        Self {
            content: String::new(),
            platform: SocialPlatform::default().as_str().to_string(),
            scheduled_time: String::new(),
        }
    }
}

impl SocialPostForm {
    fn platform(&self) -> SocialPlatform {
        SocialPlatform::parse(&self.platform)
    }

    fn parse_schedule(&self) -> Result<Option<NaiveDateTime>, ValidationError> {
        let Some(raw) = optional(&self.scheduled_time) else {
            return Ok(None);
        };
        DATETIME_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
            .map(Some)
            .ok_or_else(|| {
                ValidationError::new("scheduled_time", "Scheduled time is not a valid date")
            })
    }
}

impl FormFields for SocialPostForm {
    fn fields() -> &'static [FieldSpec] {
        &SOCIAL_POST_FIELDS
    }

    fn get(&self, field: &str) -> String {
        match field {
            "content" => self.content.clone(),
            "platform" => self.platform.clone(),
            "scheduled_time" => self.scheduled_time.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "content" => self.content = value,
            "platform" => self.platform = value,
            "scheduled_time" => self.scheduled_time = value,
            _ => tracing::warn!(field, "ignoring unknown form field"),
        }
    }

    fn hint(&self, field: &str) -> Option<String> {
        let platform = self.platform();
        (field == "content" && platform == SocialPlatform::Twitter).then(|| {
            format!(
                "{}/{}",
                self.content.chars().count(),
                platform.char_limit()
            )
        })
    }
}

impl RecordForm for SocialPostForm {
    type Record = SocialPost;
    const NOUN: &'static str = "Post";

    fn from_record(post: &SocialPost) -> Self {
        Self {
            content: post.content.clone(),
            // a channel the form cannot offer must be picked again
            platform: match post.platform {
                SocialPlatform::Other => String::new(),
                known => known.as_str().to_string(),
            },
            // datetime-local wants minutes precision and no zone suffix
            scheduled_time: post
                .scheduled_time
                .as_deref()
                .map(|t| t.chars().take(16).collect())
                .unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> Result<SocialPostDraft, ValidationError> {
        let platform = self.platform();
        if platform == SocialPlatform::Other {
            return Err(ValidationError::new("platform", "Choose a platform"));
        }
        let content = required("content", "Post content", &self.content)?;
        max_chars("content", "Post content", &content, platform.char_limit())?;
        Ok(SocialPostDraft {
            content,
            platform,
            scheduled_time: self.parse_schedule()?,
        })
    }
}

// =========================================================
// Email template
// =========================================================

const EMAIL_TEMPLATE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("name", "Template name", FieldKind::Text).required(),
    FieldSpec::new("subject", "Subject", FieldKind::Text).required(),
    FieldSpec::new("content", "Content", FieldKind::TextArea).required(),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailTemplateForm {
    pub name: String,
    pub subject: String,
    pub content: String,
}

impl_form_fields!(EmailTemplateForm, &EMAIL_TEMPLATE_FIELDS, [name, subject, content]);

impl RecordForm for EmailTemplateForm {
    type Record = EmailTemplate;
    const NOUN: &'static str = "Template";

    fn from_record(template: &EmailTemplate) -> Self {
        Self {
            name: template.name.clone(),
            subject: template.subject.clone(),
            content: template.content.clone(),
        }
    }

    fn to_draft(&self) -> Result<EmailTemplateDraft, ValidationError> {
        Ok(EmailTemplateDraft {
            name: required("name", "Template name", &self.name)?,
            subject: required("subject", "Subject", &self.subject)?,
            content: required("content", "Content", &self.content)?,
        })
    }
}

// =========================================================
// Profile
// =========================================================

const PROFILE_FIELDS: [FieldSpec; 6] = [
    FieldSpec::new("first_name", "First name", FieldKind::Text),
    FieldSpec::new("last_name", "Last name", FieldKind::Text),
    FieldSpec::new("company", "Company", FieldKind::Text),
    FieldSpec::new("location", "Location", FieldKind::Text),
    FieldSpec::new("bio", "Bio", FieldKind::TextArea),
    FieldSpec::new("avatar_url", "Avatar URL", FieldKind::Url),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub location: String,
    pub bio: String,
    pub avatar_url: String,
}

impl_form_fields!(
    ProfileForm,
    &PROFILE_FIELDS,
    [first_name, last_name, company, location, bio, avatar_url]
);

impl RecordForm for ProfileForm {
    type Record = UserProfile;
    const NOUN: &'static str = "Profile";

    fn from_record(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            company: profile.company.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> Result<ProfileUpdate, ValidationError> {
        Ok(ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            bio: self.bio.trim().to_string(),
            avatar_url: optional(&self.avatar_url),
        })
    }
}

// =========================================================
// Account forms
// =========================================================

const CHANGE_PASSWORD_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("current_password", "Current password", FieldKind::Password).required(),
    FieldSpec::new("new_password", "New password", FieldKind::Password).required(),
    FieldSpec::new("confirm_password", "Confirm new password", FieldKind::Password).required(),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl_form_fields!(
    ChangePasswordForm,
    &CHANGE_PASSWORD_FIELDS,
    [current_password, new_password, confirm_password]
);

impl ChangePasswordForm {
    pub fn to_request(&self) -> Result<ChangePasswordRequest, ValidationError> {
        if self.current_password.is_empty() {
            return Err(ValidationError::new(
                "current_password",
                "Current password is required",
            ));
        }
        matching(
            "confirm_password",
            &self.new_password,
            &self.confirm_password,
            "New passwords must match",
        )?;
        password_strength("new_password", &self.new_password)?;
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

const CHANGE_EMAIL_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("new_email", "New email", FieldKind::Email).required(),
    FieldSpec::new("confirm_email", "Confirm new email", FieldKind::Email).required(),
    FieldSpec::new("password", "Password", FieldKind::Password).required(),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeEmailForm {
    pub new_email: String,
    pub confirm_email: String,
    pub password: String,
}

impl_form_fields!(
    ChangeEmailForm,
    &CHANGE_EMAIL_FIELDS,
    [new_email, confirm_email, password]
);

impl ChangeEmailForm {
    pub fn to_request(&self) -> Result<ChangeEmailRequest, ValidationError> {
        let email = self.new_email.trim();
        if email.is_empty() || email != self.confirm_email.trim() {
            return Err(ValidationError::new(
                "confirm_email",
                "Emails must match and not be empty",
            ));
        }
        if self.password.is_empty() {
            return Err(ValidationError::new(
                "password",
                "Password is required to change email",
            ));
        }
        Ok(ChangeEmailRequest {
            new_email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

const SIGNUP_FIELDS: [FieldSpec; 4] = [
    FieldSpec::new("email", "Email", FieldKind::Email).required(),
    FieldSpec::new("username", "Username", FieldKind::Text).required(),
    FieldSpec::new("password", "Password", FieldKind::Password).required(),
    FieldSpec::new("password_confirm", "Confirm password", FieldKind::Password).required(),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

impl_form_fields!(
    SignupForm,
    &SIGNUP_FIELDS,
    [email, username, password, password_confirm]
);

impl SignupForm {
    pub fn to_request(&self) -> Result<SignupRequest, ValidationError> {
        let email = required("email", "Email", &self.email)?;
        let username = required("username", "Username", &self.username)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "Password is required"));
        }
        matching(
            "password_confirm",
            &self.password,
            &self.password_confirm,
            "Passwords do not match",
        )?;
        password_strength("password", &self.password)?;
        Ok(SignupRequest {
            email,
            username,
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        })
    }
}

// =========================================================
// Analytics export
// =========================================================

pub const EXPORT_FORMATS: &[(&str, &str)] = &[("csv", "CSV"), ("json", "JSON")];

const EXPORT_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new("format", "Format", FieldKind::Select(EXPORT_FORMATS)).required(),
    FieldSpec::new("start_date", "From", FieldKind::Date),
    FieldSpec::new("end_date", "To", FieldKind::Date),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExportForm {
    pub format: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for ExportForm {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

impl_form_fields!(ExportForm, &EXPORT_FIELDS, [format, start_date, end_date]);

fn date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    optional(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| ValidationError::new(field, "Enter a valid date"))
        })
        .transpose()
}

impl ExportForm {
    pub fn to_request(&self) -> Result<ExportRequest, ValidationError> {
        let format = match self.format.as_str() {
            "csv" => ExportFormat::Csv,
            "json" => ExportFormat::Json,
            _ => return Err(ValidationError::new("format", "Choose an export format")),
        };
        let start_date = date("start_date", &self.start_date)?;
        let end_date = date("end_date", &self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ValidationError::new(
                    "end_date",
                    "End date must not be before the start date",
                ));
            }
        }
        Ok(ExportRequest {
            format,
            start_date,
            end_date,
        })
    }
}

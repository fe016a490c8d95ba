//! Wire types for the BlazingSocial REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's snake_case JSON. Optional columns default
//! on deserialize so older records with missing keys still decode.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::distribution::DistributionStatus;
use crate::state::settings::UserSettings;

// =============================================================================
// LIST ENVELOPES
// =============================================================================

/// Page envelope returned by paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer either with a page envelope or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    #[must_use]
    pub fn into_page(self) -> Paginated<T> {
        match self {
            Self::Paginated(page) => page,
            Self::Plain(results) => Paginated {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            },
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// The cached user object kept alongside the session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
}

impl CurrentUser {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.email)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

// =============================================================================
// CONTACTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Contact,
    Partner,
    Both,
}

impl CustomerType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Partner => "partner",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    #[default]
    Send,
    DontSend,
}

impl SendStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::DontSend => "dont_send",
        }
    }
}

/// A person record: contact, referral partner, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub customer_type: CustomerType,
    #[serde(default)]
    pub send_status: SendStatus,
    #[serde(default)]
    pub optout: bool,
    #[serde(default)]
    pub newsletter_version: Option<String>,
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Contact {
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.email)
    }
}

/// Fields accepted by the contact creation form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub send_status: Option<SendStatus>,
    pub newsletter_version: Option<String>,
    pub notes: Option<String>,
}

/// A single editable contact column, for one-field inline updates.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactField {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(Option<String>),
    Company(Option<String>),
    CustomerType(CustomerType),
    SendStatus(SendStatus),
    Optout(bool),
    NewsletterVersion(Option<String>),
    LoanAmount(Option<f64>),
    LoanType(Option<String>),
    InterestRate(Option<f64>),
    ClosingDate(Option<NaiveDate>),
    Notes(Option<String>),
}

impl ContactField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
            Self::Company(_) => "company",
            Self::CustomerType(_) => "customer_type",
            Self::SendStatus(_) => "send_status",
            Self::Optout(_) => "optout",
            Self::NewsletterVersion(_) => "newsletter_version",
            Self::LoanAmount(_) => "loan_amount",
            Self::LoanType(_) => "loan_type",
            Self::InterestRate(_) => "interest_rate",
            Self::ClosingDate(_) => "closing_date",
            Self::Notes(_) => "notes",
        }
    }

    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::FirstName(v) | Self::LastName(v) | Self::Email(v) => Value::String(v.clone()),
            Self::Phone(v) | Self::Company(v) | Self::NewsletterVersion(v) | Self::LoanType(v) | Self::Notes(v) => {
                v.clone().map_or(Value::Null, Value::String)
            }
            Self::CustomerType(v) => Value::String(v.as_str().to_owned()),
            Self::SendStatus(v) => Value::String(v.as_str().to_owned()),
            Self::Optout(v) => Value::Bool(*v),
            Self::LoanAmount(v) | Self::InterestRate(v) => v.map_or(Value::Null, Value::from),
            Self::ClosingDate(v) => v.map_or(Value::Null, |d| Value::String(d.to_string())),
        }
    }

    /// The `PATCH` body: exactly one key.
    #[must_use]
    pub fn to_patch(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert(self.name().to_owned(), self.value());
        Value::Object(body)
    }
}

// =============================================================================
// EMAIL TEMPLATES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A staff-authored template, optionally cloned from a default template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
    /// Editor design document; opaque to this client.
    #[serde(default)]
    pub design: Option<Value>,
    #[serde(default)]
    pub default_template: Option<i64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailTemplateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_template: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A platform-provided template staff can distribute or clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultTemplate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
    /// Category id; labels come from the lookup table.
    #[serde(default)]
    pub category: Option<u16>,
    /// Email type id; labels come from the lookup table.
    #[serde(default)]
    pub email_type: Option<u16>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefaultTemplateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Who a send or distribution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    Contacts,
    Partners,
    All,
    Custom,
}

impl RecipientType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::Partners => "partners",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }
}

/// Body of a template send; `emails` is resolved client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub recipient_type: RecipientType,
    pub emails: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub queued: u64,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailHistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub subject: String,
    pub recipient: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

// =============================================================================
// ECARDS / NEWSLETTERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecard {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Ecard category id; labels come from the lookup table.
    pub category: u16,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EcardInput {
    pub name: Option<String>,
    pub category: Option<u16>,
    pub greeting: Option<String>,
    pub html: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Newsletter {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub market_update: String,
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub closing: String,
    #[serde(default)]
    pub schedule_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsletterInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Ecard,
    Newsletter,
}

impl DistributionKind {
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            Self::Ecard => "ecards",
            Self::Newsletter => "newsletters",
        }
    }
}

/// Server-side record of one fan-out of an ecard or newsletter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: i64,
    #[serde(default)]
    pub ecard: Option<i64>,
    #[serde(default)]
    pub newsletter: Option<i64>,
    pub recipient_type: RecipientType,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub status: DistributionStatus,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub sent_count: u64,
    #[serde(default)]
    pub failed_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDistribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecard: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<i64>,
    pub recipient_type: RecipientType,
    pub recipients: Vec<String>,
}

// =============================================================================
// TEMPLATES / USERS / ICONS / CRON
// =============================================================================

/// A reusable content block from the shared template library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub settings: UserSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialIcon {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialIconInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CronStatus {
    Running,
    Stopped,
    Failed,
}

impl CronStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronJob {
    pub id: i64,
    pub name: String,
    pub schedule: String,
    #[serde(default)]
    pub task: String,
    pub status: CronStatus,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CronJobInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

fn display_name(first: &str, last: &str, fallback: &str) -> String {
    let full = format!("{} {}", first.trim(), last.trim());
    let full = full.trim();
    if full.is_empty() { fallback.to_owned() } else { full.to_owned() }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

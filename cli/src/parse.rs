//! Argument parsing that clap cannot do on its own.

use blazing_admin::net::types::{ContactField, CustomerType, SendStatus};
use blazing_admin::state::distribution::DistributionStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldParseError {
    #[error("unknown contact field `{0}`")]
    UnknownField(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

fn invalid(field: &'static str, value: &str) -> FieldParseError {
    FieldParseError::InvalidValue { field, value: value.to_owned() }
}

/// Blank clears an optional column.
fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn optional_parsed<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<Option<T>, FieldParseError> {
    optional(value)
        .map(|v| v.parse::<T>().map_err(|_| invalid(field, value)))
        .transpose()
}

pub fn parse_customer_type(value: &str) -> Result<CustomerType, FieldParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "contact" => Ok(CustomerType::Contact),
        "partner" => Ok(CustomerType::Partner),
        "both" => Ok(CustomerType::Both),
        _ => Err(invalid("customer_type", value)),
    }
}

pub fn parse_send_status(value: &str) -> Result<SendStatus, FieldParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "send" => Ok(SendStatus::Send),
        "dont_send" | "dont-send" => Ok(SendStatus::DontSend),
        _ => Err(invalid("send_status", value)),
    }
}

pub fn parse_status(value: &str) -> Result<DistributionStatus, String> {
    value.parse::<DistributionStatus>().map_err(|e| e.to_string())
}

/// Build a one-column contact update from `name` and its raw text value.
pub fn parse_contact_field(name: &str, value: &str) -> Result<ContactField, FieldParseError> {
    let field = match name.trim() {
        "first_name" => ContactField::FirstName(value.trim().to_owned()),
        "last_name" => ContactField::LastName(value.trim().to_owned()),
        "email" => ContactField::Email(value.trim().to_owned()),
        "phone" => ContactField::Phone(optional(value)),
        "company" => ContactField::Company(optional(value)),
        "customer_type" => ContactField::CustomerType(parse_customer_type(value)?),
        "send_status" => ContactField::SendStatus(parse_send_status(value)?),
        "optout" => ContactField::Optout(value.trim().parse().map_err(|_| invalid("optout", value))?),
        "newsletter_version" => ContactField::NewsletterVersion(optional(value)),
        "loan_amount" => ContactField::LoanAmount(optional_parsed("loan_amount", value)?),
        "loan_type" => ContactField::LoanType(optional(value)),
        "interest_rate" => ContactField::InterestRate(optional_parsed("interest_rate", value)?),
        "closing_date" => ContactField::ClosingDate(optional_parsed("closing_date", value)?),
        "notes" => ContactField::Notes(optional(value)),
        other => return Err(FieldParseError::UnknownField(other.to_owned())),
    };
    Ok(field)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

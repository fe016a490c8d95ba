//! Recipient-set resolution for sends and distributions.
//!
//! DESIGN
//! ======
//! [`is_sendable`] is the only opt-out rule. Every non-custom resolution
//! path goes through it; custom lists are taken as typed, validated only for
//! shape.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::net::types::{Contact, CustomerType, RecipientType, SendStatus};
use crate::util::placeholder::Recipient;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Result of resolving a recipient set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRecipients {
    /// Deduplicated addresses, in first-seen order.
    pub emails: Vec<String>,
    /// Custom entries that do not look like an address.
    pub invalid: Vec<String>,
}

/// Whether a contact may receive bulk mail.
#[must_use]
pub fn is_sendable(contact: &Contact) -> bool {
    !contact.optout && contact.send_status != SendStatus::DontSend
}

/// Whether `recipient_type` targets contacts of `customer_type`.
#[must_use]
pub fn selects(recipient_type: RecipientType, customer_type: CustomerType) -> bool {
    match recipient_type {
        RecipientType::Contacts => matches!(customer_type, CustomerType::Contact | CustomerType::Both),
        RecipientType::Partners => matches!(customer_type, CustomerType::Partner | CustomerType::Both),
        RecipientType::All => true,
        RecipientType::Custom => false,
    }
}

#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// Sendable contacts selected by `recipient_type`, deduplicated by address.
///
/// An address held by any unsendable record is excluded even when another
/// record with the same address is sendable. `Custom` selects no contacts;
/// use [`parse_custom`] for typed lists.
#[must_use]
pub fn select_contacts(contacts: &[Contact], recipient_type: RecipientType) -> Vec<&Contact> {
    let blocked: HashSet<String> = contacts
        .iter()
        .filter(|c| !is_sendable(c))
        .map(|c| c.email.trim().to_lowercase())
        .collect();
    let mut seen = HashSet::new();
    contacts
        .iter()
        .filter(|c| selects(recipient_type, c.customer_type) && is_sendable(c))
        .filter(|c| !blocked.contains(&c.email.trim().to_lowercase()))
        .filter(|c| {
            let email = c.email.trim();
            !email.is_empty() && seen.insert(email.to_lowercase())
        })
        .collect()
}

/// Addresses of [`select_contacts`], trimmed.
#[must_use]
pub fn resolve_contacts(contacts: &[Contact], recipient_type: RecipientType) -> Vec<String> {
    select_contacts(contacts, recipient_type)
        .into_iter()
        .map(|c| c.email.trim().to_owned())
        .collect()
}

/// Name/email pairs for personalized sends.
#[must_use]
pub fn resolve_recipients(contacts: &[Contact], recipient_type: RecipientType) -> Vec<Recipient> {
    select_contacts(contacts, recipient_type)
        .into_iter()
        .map(|c| Recipient::new(c.display_name(), c.email.trim()))
        .collect()
}

/// Split a comma-separated list into valid and invalid entries.
///
/// Entries are trimmed; empty entries are skipped; duplicates collapse
/// case-insensitively keeping the first spelling.
#[must_use]
pub fn parse_custom(raw: &str) -> ResolvedRecipients {
    let mut resolved = ResolvedRecipients::default();
    let mut seen = HashSet::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        if !seen.insert(entry.to_lowercase()) {
            continue;
        }
        if is_valid_email(entry) {
            resolved.emails.push(entry.to_owned());
        } else {
            resolved.invalid.push(entry.to_owned());
        }
    }
    resolved
}

/// Resolve any recipient type: contacts for the built-in sets, `custom_raw`
/// for `Custom`.
#[must_use]
pub fn resolve(recipient_type: RecipientType, contacts: &[Contact], custom_raw: &str) -> ResolvedRecipients {
    match recipient_type {
        RecipientType::Custom => parse_custom(custom_raw),
        other => ResolvedRecipients { emails: resolve_contacts(contacts, other), invalid: Vec::new() },
    }
}

#[cfg(test)]
#[path = "recipients_test.rs"]
mod tests;

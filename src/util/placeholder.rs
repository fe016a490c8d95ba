//! Recipient placeholder substitution for email and ecard HTML.

use crate::net::types::Contact;

pub const NAME_TOKEN: &str = "*title1*";
pub const EMAIL_TOKEN: &str = "*email1*";

/// Who a rendered copy is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

impl Recipient {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }

    #[must_use]
    pub fn from_contact(contact: &Contact) -> Self {
        Self::new(contact.display_name(), contact.email.clone())
    }
}

/// The literal tokens replaced with a recipient's name and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    name_token: String,
    email_token: String,
}

impl Default for PlaceholderSet {
    fn default() -> Self {
        Self::new(NAME_TOKEN, EMAIL_TOKEN)
    }
}

impl PlaceholderSet {
    #[must_use]
    pub fn new(name_token: impl Into<String>, email_token: impl Into<String>) -> Self {
        Self { name_token: name_token.into(), email_token: email_token.into() }
    }

    /// Replace every token occurrence in one left-to-right pass.
    ///
    /// Inserted values are never rescanned, so a name that happens to contain
    /// a token stays as typed. Everything else is copied unchanged.
    #[must_use]
    pub fn substitute(&self, html: &str, recipient: &Recipient) -> String {
        let pairs = [(self.name_token.as_str(), recipient.name.as_str()), (self.email_token.as_str(), recipient.email.as_str())];
        let mut out = String::with_capacity(html.len());
        let mut rest = html;

        loop {
            let next = pairs
                .iter()
                .filter(|(token, _)| !token.is_empty())
                .filter_map(|(token, value)| rest.find(token).map(|at| (at, token.len(), *value)))
                .min_by_key(|(at, _, _)| *at);

            let Some((at, len, value)) = next else {
                out.push_str(rest);
                return out;
            };
            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + len..];
        }
    }
}

/// Substitute the default tokens.
#[must_use]
pub fn substitute(html: &str, name: &str, email: &str) -> String {
    PlaceholderSet::default().substitute(html, &Recipient::new(name, email))
}

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;

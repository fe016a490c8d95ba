use super::*;

use crate::net::types::{CustomerType, SendStatus};

#[test]
fn replaces_name_and_email_tokens() {
    assert_eq!(
        substitute("Hi *title1*, email us at *email1*", "Jane Doe", "jane@x.com"),
        "Hi Jane Doe, email us at jane@x.com"
    );
}

#[test]
fn replaces_every_occurrence() {
    assert_eq!(substitute("*title1* *title1* *email1**email1*", "A", "a@x"), "A A a@xa@x");
}

#[test]
fn leaves_other_content_byte_identical() {
    let html = "<p style=\"x\">*title*1 \u{1f389} *email*</p>\r\n";
    assert_eq!(substitute(html, "Jane", "jane@x.com"), html);
}

#[test]
fn inserted_values_are_not_rescanned() {
    assert_eq!(substitute("*title1*|*email1*", "*email1*", "j@x.com"), "*email1*|j@x.com");
}

#[test]
fn custom_tokens() {
    let set = PlaceholderSet::new("{{name}}", "");
    let recipient = Recipient::new("Sam", "sam@x.com");
    assert_eq!(set.substitute("Dear {{name}} *email1*", &recipient), "Dear Sam *email1*");
}

#[test]
fn recipient_from_contact_uses_display_name() {
    let contact = Contact {
        id: 1,
        first_name: String::new(),
        last_name: String::new(),
        email: "solo@x.com".to_owned(),
        phone: None,
        company: None,
        customer_type: CustomerType::Contact,
        send_status: SendStatus::Send,
        optout: false,
        newsletter_version: None,
        loan_amount: None,
        loan_type: None,
        interest_rate: None,
        closing_date: None,
        notes: None,
    };
    assert_eq!(Recipient::from_contact(&contact), Recipient::new("solo@x.com", "solo@x.com"));
}

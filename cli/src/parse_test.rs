use super::*;

#[test]
fn parses_typed_columns() {
    assert_eq!(parse_contact_field("optout", "true"), Ok(ContactField::Optout(true)));
    assert_eq!(parse_contact_field("loan_amount", "250000.5"), Ok(ContactField::LoanAmount(Some(250_000.5))));
    assert_eq!(
        parse_contact_field("closing_date", "2026-03-01"),
        Ok(ContactField::ClosingDate("2026-03-01".parse().ok()))
    );
    assert_eq!(parse_contact_field("send_status", "dont-send"), Ok(ContactField::SendStatus(SendStatus::DontSend)));
}

#[test]
fn blank_clears_optional_columns() {
    assert_eq!(parse_contact_field("phone", "  "), Ok(ContactField::Phone(None)));
    assert_eq!(parse_contact_field("interest_rate", ""), Ok(ContactField::InterestRate(None)));
}

#[test]
fn rejects_bad_input() {
    assert_eq!(parse_contact_field("nickname", "x"), Err(FieldParseError::UnknownField("nickname".to_owned())));
    assert!(matches!(
        parse_contact_field("customer_type", "vendor"),
        Err(FieldParseError::InvalidValue { field: "customer_type", .. })
    ));
    assert!(parse_contact_field("optout", "maybe").is_err());
}

#[test]
fn parses_distribution_status() {
    assert_eq!(parse_status("in_progress"), Ok(DistributionStatus::InProgress));
    assert!(parse_status("archived").is_err());
}

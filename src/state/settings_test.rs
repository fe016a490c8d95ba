use super::*;

use serde_json::json;

#[test]
fn partial_document_decodes_with_defaults() {
    let settings: UserSettings = serde_json::from_value(json!({
        "social": { "facebook": "https://fb.com/x" },
        "billing": { "trial": true },
        "legacy_key": 1,
    }))
    .unwrap();

    assert_eq!(settings.social.facebook.as_deref(), Some("https://fb.com/x"));
    assert_eq!(settings.social.website, None);
    assert!(settings.billing.trial);
    assert!(!settings.billing.auto_renew);
    assert!(settings.holidays.enabled().is_empty());
}

#[test]
fn blank_link_clears_field() {
    let mut social = SocialLinks::default();
    social.set_linkedin(" https://linkedin.com/in/x ");
    assert_eq!(social.linkedin.as_deref(), Some("https://linkedin.com/in/x"));

    social.set_linkedin("   ");
    assert_eq!(social.linkedin, None);
}

#[test]
fn configured_links_keep_display_order() {
    let mut social = SocialLinks::default();
    social.set_website("https://blazing.example");
    social.set_facebook("https://fb.com/x");

    assert_eq!(
        social.configured(),
        vec![("facebook", "https://fb.com/x"), ("website", "https://blazing.example")]
    );
}

#[test]
fn service_setter_touches_one_flag() {
    let mut services = Services::default();
    services.set(Service::Refinance, true);

    assert!(services.offers(Service::Refinance));
    assert!(!services.offers(Service::Purchase));
    assert!(services.refinance);
}

#[test]
fn holiday_preferences_list_enabled_in_calendar_order() {
    let mut holidays = HolidayPreferences::default();
    holidays.set(Holiday::Christmas, true);
    holidays.set(Holiday::NewYear, true);
    assert_eq!(holidays.enabled(), vec![Holiday::NewYear, Holiday::Christmas]);

    holidays.set_all(true);
    assert_eq!(holidays.enabled().len(), Holiday::ALL.len());
    holidays.set(Holiday::Halloween, false);
    assert!(!holidays.is_enabled(Holiday::Halloween));
}

#[test]
fn serializes_snake_case_groups() {
    let mut settings = UserSettings::default();
    settings.billing.set_billing_active(true);
    let value = serde_json::to_value(&settings).unwrap();
    assert_eq!(value["billing"]["is_billing_active"], json!(true));
    assert_eq!(value["holidays"]["st_patricks"], json!(false));
}

//! Typed per-user settings document.
//!
//! DESIGN
//! ======
//! Each group is its own struct with explicit setters. Unknown keys from
//! the server are dropped and missing keys take their defaults, so a partial
//! document from an older account still decodes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub social: SocialLinks,
    pub services: Services,
    pub billing: BillingFlags,
    pub holidays: HolidayPreferences,
}

// =============================================================================
// SOCIAL LINKS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub website: Option<String>,
}

/// A blank link clears the field.
fn link(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl SocialLinks {
    pub fn set_facebook(&mut self, url: &str) {
        self.facebook = link(url);
    }

    pub fn set_instagram(&mut self, url: &str) {
        self.instagram = link(url);
    }

    pub fn set_linkedin(&mut self, url: &str) {
        self.linkedin = link(url);
    }

    pub fn set_twitter(&mut self, url: &str) {
        self.twitter = link(url);
    }

    pub fn set_youtube(&mut self, url: &str) {
        self.youtube = link(url);
    }

    pub fn set_website(&mut self, url: &str) {
        self.website = link(url);
    }

    /// Configured links in display order.
    #[must_use]
    pub fn configured(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", &self.facebook),
            ("instagram", &self.instagram),
            ("linkedin", &self.linkedin),
            ("twitter", &self.twitter),
            ("youtube", &self.youtube),
            ("website", &self.website),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.as_deref().map(|url| (name, url)))
        .collect()
    }
}

// =============================================================================
// SERVICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Purchase,
    Refinance,
    HomeEquity,
    ReverseMortgage,
    Commercial,
    Insurance,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub purchase: bool,
    pub refinance: bool,
    pub home_equity: bool,
    pub reverse_mortgage: bool,
    pub commercial: bool,
    pub insurance: bool,
}

impl Services {
    pub fn set(&mut self, service: Service, offered: bool) {
        *self.slot(service) = offered;
    }

    #[must_use]
    pub fn offers(&self, service: Service) -> bool {
        match service {
            Service::Purchase => self.purchase,
            Service::Refinance => self.refinance,
            Service::HomeEquity => self.home_equity,
            Service::ReverseMortgage => self.reverse_mortgage,
            Service::Commercial => self.commercial,
            Service::Insurance => self.insurance,
        }
    }

    fn slot(&mut self, service: Service) -> &mut bool {
        match service {
            Service::Purchase => &mut self.purchase,
            Service::Refinance => &mut self.refinance,
            Service::HomeEquity => &mut self.home_equity,
            Service::ReverseMortgage => &mut self.reverse_mortgage,
            Service::Commercial => &mut self.commercial,
            Service::Insurance => &mut self.insurance,
        }
    }
}

// =============================================================================
// BILLING
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingFlags {
    pub is_billing_active: bool,
    pub auto_renew: bool,
    pub trial: bool,
}

impl BillingFlags {
    pub fn set_billing_active(&mut self, active: bool) {
        self.is_billing_active = active;
    }

    pub fn set_auto_renew(&mut self, auto_renew: bool) {
        self.auto_renew = auto_renew;
    }

    pub fn set_trial(&mut self, trial: bool) {
        self.trial = trial;
    }
}

// =============================================================================
// HOLIDAYS
// =============================================================================

/// Occasions an ecard can be sent for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Holiday {
    NewYear,
    Valentines,
    StPatricks,
    Easter,
    MothersDay,
    MemorialDay,
    FathersDay,
    IndependenceDay,
    LaborDay,
    Halloween,
    Thanksgiving,
    Christmas,
    Birthday,
    Anniversary,
}

impl Holiday {
    pub const ALL: [Self; 14] = [
        Self::NewYear,
        Self::Valentines,
        Self::StPatricks,
        Self::Easter,
        Self::MothersDay,
        Self::MemorialDay,
        Self::FathersDay,
        Self::IndependenceDay,
        Self::LaborDay,
        Self::Halloween,
        Self::Thanksgiving,
        Self::Christmas,
        Self::Birthday,
        Self::Anniversary,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayPreferences {
    pub new_year: bool,
    pub valentines: bool,
    pub st_patricks: bool,
    pub easter: bool,
    pub mothers_day: bool,
    pub memorial_day: bool,
    pub fathers_day: bool,
    pub independence_day: bool,
    pub labor_day: bool,
    pub halloween: bool,
    pub thanksgiving: bool,
    pub christmas: bool,
    pub birthday: bool,
    pub anniversary: bool,
}

impl HolidayPreferences {
    pub fn set(&mut self, holiday: Holiday, enabled: bool) {
        *self.slot(holiday) = enabled;
    }

    pub fn set_all(&mut self, enabled: bool) {
        for holiday in Holiday::ALL {
            self.set(holiday, enabled);
        }
    }

    #[must_use]
    pub fn is_enabled(&self, holiday: Holiday) -> bool {
        match holiday {
            Holiday::NewYear => self.new_year,
            Holiday::Valentines => self.valentines,
            Holiday::StPatricks => self.st_patricks,
            Holiday::Easter => self.easter,
            Holiday::MothersDay => self.mothers_day,
            Holiday::MemorialDay => self.memorial_day,
            Holiday::FathersDay => self.fathers_day,
            Holiday::IndependenceDay => self.independence_day,
            Holiday::LaborDay => self.labor_day,
            Holiday::Halloween => self.halloween,
            Holiday::Thanksgiving => self.thanksgiving,
            Holiday::Christmas => self.christmas,
            Holiday::Birthday => self.birthday,
            Holiday::Anniversary => self.anniversary,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> Vec<Holiday> {
        Holiday::ALL
            .into_iter()
            .filter(|h| self.is_enabled(*h))
            .collect()
    }

    fn slot(&mut self, holiday: Holiday) -> &mut bool {
        match holiday {
            Holiday::NewYear => &mut self.new_year,
            Holiday::Valentines => &mut self.valentines,
            Holiday::StPatricks => &mut self.st_patricks,
            Holiday::Easter => &mut self.easter,
            Holiday::MothersDay => &mut self.mothers_day,
            Holiday::MemorialDay => &mut self.memorial_day,
            Holiday::FathersDay => &mut self.fathers_day,
            Holiday::IndependenceDay => &mut self.independence_day,
            Holiday::LaborDay => &mut self.labor_day,
            Holiday::Halloween => &mut self.halloween,
            Holiday::Thanksgiving => &mut self.thanksgiving,
            Holiday::Christmas => &mut self.christmas,
            Holiday::Birthday => &mut self.birthday,
            Holiday::Anniversary => &mut self.anniversary,
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

//! Static marketing content that is not managed through the admin console.

use crate::i18n::Language;
use crate::models::ContactProfile;
use serde::Serialize;

/// Text with an English and a Mongolian rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: &'static str,
    pub mn: &'static str,
}

impl LocalizedText {
    pub const fn new(en: &'static str, mn: &'static str) -> Self {
        Self { en, mn }
    }

    pub fn get(&self, language: Language) -> &'static str {
        if language == Language::MONGOLIAN {
            self.mn
        } else {
            self.en
        }
    }
}

pub struct Statistic {
    pub value: u32,
    pub suffix: &'static str,
    pub label: LocalizedText,
    pub description: LocalizedText,
}

pub const STATISTICS: [Statistic; 6] = [
    Statistic {
        value: 51400,
        suffix: " m³",
        label: LocalizedText::new("Concrete Structures", "Бетон байгууламж"),
        description: LocalizedText::new("Inspected concrete volume", "Шалгасан бетоны эзэлхүүн"),
    },
    Statistic {
        value: 2350,
        suffix: " km",
        label: LocalizedText::new("Long Pipes", "Урт хоолой"),
        description: LocalizedText::new("Water and gas pipes inspected", "Шалгасан ус, хийн хоолой"),
    },
    Statistic {
        value: 2250,
        suffix: "+",
        label: LocalizedText::new("Pressure Vessels", "Даралтат сав"),
        description: LocalizedText::new("Vessels and pipes inspected", "Шалгасан сав, хоолой"),
    },
    Statistic {
        value: 1875,
        suffix: "+",
        label: LocalizedText::new("Steam Boilers", "Уурын зуух"),
        description: LocalizedText::new("Boilers and turbines inspected", "Шалгасан зуух, турбин"),
    },
    Statistic {
        value: 7500,
        suffix: "+",
        label: LocalizedText::new("Pressure Gauges", "Даралт хэмжигч"),
        description: LocalizedText::new("Gauges tested and supplied", "Турших, нийлүүлсэн"),
    },
    Statistic {
        value: 1950,
        suffix: "+",
        label: LocalizedText::new("Safety Valves", "Аюулгүйн хавхлага"),
        description: LocalizedText::new("Valves tested and certified", "Турших, баталгаажуулсан"),
    },
];

pub struct TeamFeature {
    pub title: LocalizedText,
    pub description: LocalizedText,
}

pub const TEAM_FEATURES: [TeamFeature; 3] = [
    TeamFeature {
        title: LocalizedText::new(
            "Certified Professionals",
            "Мэргэжлийн баталгаат боловсон хүчин",
        ),
        description: LocalizedText::new(
            "Workforce qualified under MNS ISO 9712:2019 for employee qualification and certification.",
            "MNS ISO 9712:2019 стандартын дагуу ажилтнуудыг гэрчилгээжүүлсэн.",
        ),
    },
    TeamFeature {
        title: LocalizedText::new("Continuous Education", "Тасралтгүй боловсрол"),
        description: LocalizedText::new(
            "Ongoing training programs to keep our team updated with the latest NDT technologies.",
            "Манай багийг хамгийн сүүлийн үеийн NDT технологиудаар шинэчилж байх сургалтын хөтөлбөрүүд.",
        ),
    },
    TeamFeature {
        title: LocalizedText::new("Team Culture", "Багийн соёл"),
        description: LocalizedText::new(
            "A collaborative environment fostering teamwork, innovation, and professional growth.",
            "Багаар ажиллах, инноваци, мэргэжлийн өсөлтийг дэмжих хамтын орчин.",
        ),
    },
];

pub const PERSONNEL_STANDARD: &str = "MNS ISO 9712:2019";

pub const APPLICATIONS: [LocalizedText; 5] = [
    LocalizedText::new("Steam boilers and turbines", "Уурын зуух, турбин"),
    LocalizedText::new("Steam, water, and gas pipes", "Уур, ус, хийн хоолой"),
    LocalizedText::new("Pressure vessels", "Даралтат сав"),
    LocalizedText::new("Fuel and gas storage tanks", "Түлш, хийн сав"),
    LocalizedText::new("Industrial equipment", "Аж үйлдвэрийн тоног төхөөрөмж"),
];

/// Accreditations shown in the hero and footer.
pub const CERTIFICATIONS: [&str; 3] = ["ISO 9001:2015", "MNS ISO/IEC 17020:2013", "ISO 45001:2018"];

/// Hero motto, in display order.
pub const MOTTO_KEYS: [&str; 3] = ["hero.quality", "hero.safety", "hero.rapidity"];

/// About-section pillars as (title key, description key).
pub const ABOUT_PILLARS: [(&str, &str); 4] = [
    ("about.mission.title", "about.mission.description"),
    ("about.vision.title", "about.vision.description"),
    ("about.values.title", "about.values.description"),
    ("about.history.title", "about.history.description"),
];

pub const DEFAULT_ADDRESS: &str = "ХУД 23 хороо тэнгэр плаза 12давхар";
pub const DEFAULT_PHONE: &str = "+976-7015 7000, +976-8888 1520";
pub const DEFAULT_EMAIL: &str = "info@armos.mn";
pub const WEBSITE: &str = "www.armos.mn";

/// Company contact details as displayed, with built-in values for anything
/// the stored profile leaves blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

impl ContactDetails {
    pub fn resolve(profile: Option<&ContactProfile>) -> Self {
        fn pick(stored: Option<&str>, fallback: &str) -> String {
            match stored.map(str::trim) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => fallback.to_string(),
            }
        }

        Self {
            address: pick(profile.map(|p| p.address.as_str()), DEFAULT_ADDRESS),
            phone: pick(profile.map(|p| p.phone.as_str()), DEFAULT_PHONE),
            email: pick(profile.map(|p| p.email.as_str()), DEFAULT_EMAIL),
            website: WEBSITE.to_string(),
        }
    }
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self::resolve(None)
    }
}

//! Static translation table for every localized string the site renders.
//!
//! Entries are keyed by language code and then by a dotted string key
//! (`section.name`). Lookups never fail: a key with no entry for the active
//! language resolves to the key itself, so a missing translation shows up on
//! the page verbatim instead of breaking it.

use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Language-indexed key/value table.
pub struct TranslationTable {
    entries: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static TABLE: OnceLock<TranslationTable> = OnceLock::new();

impl TranslationTable {
    /// Get the global translation table.
    pub fn get() -> &'static TranslationTable {
        TABLE.get_or_init(|| {
            TranslationTable::from_entries(&[
                ("en", ENGLISH_ENTRIES),
                ("mn", MONGOLIAN_ENTRIES),
            ])
        })
    }

    /// Build a table from `(language code, entries)` pairs.
    pub fn from_entries(languages: &[(&'static str, &[(&'static str, &'static str)])]) -> Self {
        let entries = languages
            .iter()
            .map(|(code, pairs)| (*code, pairs.iter().copied().collect()))
            .collect();

        Self { entries }
    }

    /// Resolve `key` for `language`, falling back to the key itself.
    pub fn resolve<'k>(&self, language: Language, key: &'k str) -> &'k str {
        match self.lookup(language.code(), key) {
            Some(text) => text,
            None => key,
        }
    }

    /// Exact lookup without fallback.
    pub fn lookup(&self, code: &str, key: &str) -> Option<&'static str> {
        self.entries.get(code)?.get(key).copied()
    }

    /// All keys defined for a language code, sorted.
    pub fn keys(&self, code: &str) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .entries
            .get(code)
            .map(|pairs| pairs.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Language codes that have entries, sorted.
    pub fn languages(&self) -> Vec<&'static str> {
        let mut codes: Vec<_> = self.entries.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}

// ==================== English ====================

const ENGLISH_ENTRIES: &[(&str, &str)] = &[
    // Navigation
    ("nav.about", "About"),
    ("nav.services", "Services"),
    ("nav.impact", "Impact"),
    ("nav.team", "Team"),
    ("nav.partners", "Partners"),
    ("nav.news", "News"),
    ("nav.contact", "Contact"),
    ("nav.getQuote", "Get a Quote"),
    // Hero
    ("hero.badge", "15+ Years of Excellence • Since 2008"),
    ("hero.quality", "Quality"),
    ("hero.safety", "Safety"),
    ("hero.rapidity", "Rapidity"),
    (
        "hero.description",
        "Providing highly experienced professional non-destructive testing (NDT) and independent inspection for energy, industrial, and construction sectors.",
    ),
    ("hero.cta", "Request an Inspection"),
    ("hero.learnMore", "Learn More"),
    ("hero.certified", "Certified & Accredited"),
    // About
    ("about.tag", "About Us"),
    ("about.title", "15 Years of Technical Excellence"),
    (
        "about.description",
        "ARMOS has been Mongolia's trusted partner in non-destructive testing and independent inspection since 2008. Our commitment to international standards ensures the highest quality and safety for your projects.",
    ),
    ("about.mission.title", "Mission"),
    (
        "about.mission.description",
        "To implement novel international practices based on standards and cutting-edge technology to remain a reliable service for customers.",
    ),
    ("about.vision.title", "Vision"),
    (
        "about.vision.description",
        "To be a leader in all aspects of progress in the non-destructive testing industry.",
    ),
    ("about.values.title", "Values"),
    (
        "about.values.description",
        "Transparency, honesty, independence, ethical culture, and high competence.",
    ),
    ("about.history.title", "History"),
    (
        "about.history.description",
        "Founded in 2008, celebrating over 15 years of continuous operations in the NDT field.",
    ),
    // Services
    ("services.tag", "Our Services"),
    ("services.title", "Comprehensive NDT Solutions"),
    (
        "services.description",
        "We offer a complete range of non-destructive testing methods for installation and operational inspection across all industrial sectors.",
    ),
    ("services.applications", "Applications"),
    // Service detail
    ("service.title", "Service Details"),
    (
        "service.description",
        "Inspection methods delivered by our certified specialists.",
    ),
    ("service.backToServices", "Back to Services"),
    ("service.notFound", "Service not found"),
    ("service.documents", "Documents"),
    // Statistics
    ("stats.tag", "Our Impact"),
    ("stats.title", "Proven Track Record"),
    (
        "stats.description",
        "Our extensive experience speaks through numbers. Here's the impact we've made across Mongolia's industrial sector.",
    ),
    // Human Resources
    ("hr.tag", "Our Team"),
    ("hr.title", "Expert Workforce"),
    (
        "hr.description",
        "Our strategy focuses on cultivating a competitive workforce based on modern human resource approaches, continuous education, and teamwork.",
    ),
    (
        "hr.certification",
        "All our NDT professionals are certified according to international standards for personnel qualification and certification.",
    ),
    // Partners
    ("partners.tag", "Partners"),
    ("partners.title", "Trusted by Industry Leaders"),
    (
        "partners.description",
        "We are proud to work with Mongolia's leading companies and serve as official distributors for international brands.",
    ),
    ("partners.distributor", "Official Distributor"),
    (
        "partners.distributorDesc",
        "Representing premium brands KOSEN and HUATEC in Mongolia",
    ),
    ("partners.visit", "Visit website"),
    // Contact
    ("contact.tag", "Contact"),
    ("contact.title", "Get in Touch"),
    (
        "contact.description",
        "Ready to ensure the safety and quality of your industrial projects? Reach out to our team of experts.",
    ),
    ("contact.headOffice", "Head Office"),
    ("contact.phone", "Phone"),
    ("contact.email", "Email"),
    ("contact.website", "Website"),
    ("contact.requestInspection", "Request an Inspection"),
    (
        "contact.ctaDescription",
        "Our team of certified professionals is ready to assist you with comprehensive NDT solutions tailored to your specific needs.",
    ),
    ("contact.ctaButton", "Contact Us Today"),
    ("contact.businessHours", "Business Hours: Mon - Fri, 9:00 - 18:00"),
    ("contact.modalTitle", "Contact Us"),
    (
        "contact.modalDescription",
        "Have a question or need assistance? Please fill out the form below and we will get back to you shortly.",
    ),
    ("contact.form.name", "Full Name"),
    ("contact.form.namePlaceholder", "Enter your full name"),
    ("contact.form.email", "Email Address"),
    ("contact.form.emailPlaceholder", "Enter your email address"),
    ("contact.form.message", "Message"),
    ("contact.form.messagePlaceholder", "Write your message here"),
    ("contact.form.send", "Send Message"),
    ("contact.form.cancel", "Cancel"),
    ("contact.form.success", "Thank you! Your message has been sent."),
    ("contact.form.failed", "Failed to send message"),
    // News
    ("news.tag", "News & Milestones"),
    ("news.title", "Latest Updates"),
    (
        "news.description",
        "Stay informed about our latest projects, achievements, and industry insights.",
    ),
    ("news.readMore", "Read More"),
    ("news.backToNews", "Back to News"),
    ("news.empty", "No news has been published yet."),
    ("news.notFound", "Article not found"),
    ("news.share", "Share this article"),
    ("news.shareButton", "Share"),
    ("news.related", "Related News"),
    ("news.attachment", "View attachment"),
    // Not found
    ("notFound.title", "Page not found"),
    (
        "notFound.description",
        "The page you are looking for does not exist or has been moved.",
    ),
    ("notFound.home", "Return to Home"),
    // Footer
    ("footer.certifications", "Certifications"),
    ("footer.quickLinks", "Quick Links"),
    ("footer.contactInfo", "Contact Info"),
    ("footer.years", "15+ Years of Technical Excellence"),
    ("footer.rights", "All rights reserved."),
];

// ==================== Mongolian ====================

const MONGOLIAN_ENTRIES: &[(&str, &str)] = &[
    // Navigation
    ("nav.about", "Бидний тухай"),
    ("nav.services", "Үйлчилгээ"),
    ("nav.impact", "Амжилт"),
    ("nav.team", "Хүний нөөц"),
    ("nav.partners", "Түншүүд"),
    ("nav.news", "Мэдээ"),
    ("nav.contact", "Холбоо барих"),
    ("nav.getQuote", "Үнийн санал авах"),
    // Hero
    ("hero.badge", "15+ жилийн туршлага • 2008 оноос"),
    ("hero.quality", "Чанартай"),
    ("hero.safety", "Аюулгүй"),
    ("hero.rapidity", "Шуурхай"),
    (
        "hero.description",
        "Эрчим хүч, аж үйлдвэр, барилгын салбарт мэргэжлийн өндөр туршлагатай эвдэлгүй шалгалт (NDT) болон бие даасан хяналтын үйлчилгээ үзүүлж байна.",
    ),
    ("hero.cta", "Шалгалт захиалах"),
    ("hero.learnMore", "Дэлгэрэнгүй"),
    ("hero.certified", "Гэрчилгээ, итгэмжлэл"),
    // About
    ("about.tag", "Бидний тухай"),
    ("about.title", "15 жилийн техникийн туршлага"),
    (
        "about.description",
        "АРМОС нь 2008 оноос хойш Монголын эвдэлгүй шалгалт, бие даасан хяналтын найдвартай түнш байсаар ирсэн. Олон улсын стандартад нийцсэн манай амлалт нь таны төслүүдэд хамгийн өндөр чанар, аюулгүй байдлыг хангана.",
    ),
    ("about.mission.title", "Эрхэм зорилго"),
    (
        "about.mission.description",
        "Стандарт болон орчин үеийн технологи дээр суурилсан олон улсын шинэлэг туршлагыг нэвтрүүлж, үйлчлүүлэгчдэд найдвартай үйлчилгээ үзүүлэх.",
    ),
    ("about.vision.title", "Алсын хараа"),
    (
        "about.vision.description",
        "Эвдэлгүй шалгалтын салбарын хөгжлийн бүх талаар тэргүүлэгч байх.",
    ),
    ("about.values.title", "Үнэт зүйлс"),
    (
        "about.values.description",
        "Ил тод байдал, үнэнч шударга байдал, бие даасан байдал, ёс зүйн соёл, өндөр мэргэшил.",
    ),
    ("about.history.title", "Түүх"),
    (
        "about.history.description",
        "2008 онд үүсгэн байгуулагдсан, NDT салбарт 15 гаруй жил тасралтгүй үйл ажиллагаа явуулж байна.",
    ),
    // Services
    ("services.tag", "Үйлчилгээ"),
    ("services.title", "NDT шийдлүүд"),
    (
        "services.description",
        "Бид бүх аж үйлдвэрийн салбарт суурилуулалт болон ашиглалтын үеийн хяналт шалгалтын бүрэн хүрээний эвдэлгүй шалгалтын аргуудыг санал болгодог.",
    ),
    ("services.applications", "Хэрэглээ"),
    // Service detail
    ("service.title", "Үйлчилгээний дэлгэрэнгүй"),
    (
        "service.description",
        "Манай гэрчилгээтэй мэргэжилтнүүдийн үзүүлдэг шалгалтын аргууд.",
    ),
    ("service.backToServices", "Үйлчилгээ рүү буцах"),
    ("service.notFound", "Үйлчилгээ олдсонгүй"),
    ("service.documents", "Баримт бичиг"),
    // Statistics
    ("stats.tag", "Амжилт"),
    ("stats.title", "Батлагдсан туршлага"),
    (
        "stats.description",
        "Манай өргөн туршлага тоон үзүүлэлтээр илэрхийлэгддэг. Монголын аж үйлдвэрийн салбарт бидний үзүүлсэн нөлөөллийг танилцуулж байна.",
    ),
    // Human Resources
    ("hr.tag", "Хүний нөөц"),
    ("hr.title", "Мэргэжлийн баг"),
    (
        "hr.description",
        "Манай стратеги нь орчин үеийн хүний нөөцийн арга барил, тасралтгүй боловсрол, багаар ажиллах чадварт суурилсан өрсөлдөхүйц ажиллах хүчинг бэлтгэхэд чиглэгддэг.",
    ),
    (
        "hr.certification",
        "Манай бүх NDT мэргэжилтнүүд боловсон хүчний гэрчилгээжүүлэлтийн олон улсын стандартын дагуу гэрчилгээтэй.",
    ),
    // Partners
    ("partners.tag", "Түншүүд"),
    ("partners.title", "Салбарын тэргүүлэгчдийн итгэл"),
    (
        "partners.description",
        "Бид Монголын тэргүүлэх компаниудтай хамтран ажиллаж, олон улсын брэндүүдийн албан ёсны борлуулагч болж ажилладаг.",
    ),
    ("partners.distributor", "Албан ёсны борлуулагч"),
    (
        "partners.distributorDesc",
        "Монголд KOSEN болон HUATEC брэндүүдийг төлөөлж байна",
    ),
    ("partners.visit", "Вэб сайт үзэх"),
    // Contact
    ("contact.tag", "Холбоо барих"),
    ("contact.title", "Бидэнтэй холбогдох"),
    (
        "contact.description",
        "Таны аж үйлдвэрийн төслүүдийн аюулгүй байдал, чанарыг хангахад бэлэн үү? Манай мэргэжилтнүүдтэй холбогдоорой.",
    ),
    ("contact.headOffice", "Төв оффис"),
    ("contact.phone", "Утас"),
    ("contact.email", "Имэйл"),
    ("contact.website", "Вэб"),
    ("contact.requestInspection", "Шалгалт захиалах"),
    (
        "contact.ctaDescription",
        "Манай гэрчилгээтэй мэргэжилтнүүд таны хэрэгцээнд нийцсэн NDT шийдлүүдээр туслахад бэлэн байна.",
    ),
    ("contact.ctaButton", "Өнөөдөр холбогдох"),
    ("contact.businessHours", "Ажлын цаг: Даваа - Баасан, 9:00 - 18:00"),
    ("contact.modalTitle", "Холбоо барих"),
    (
        "contact.modalDescription",
        "Танд асуулт байна уу эсвэл тусламж хэрэгтэй юу? Доорх маягтыг бөглөнө үү, бид тантай удахгүй холбогдох болно.",
    ),
    ("contact.form.name", "Овог нэр"),
    ("contact.form.namePlaceholder", "Овог нэрээ оруулна уу"),
    ("contact.form.email", "Имэйл хаяг"),
    ("contact.form.emailPlaceholder", "Имэйл хаягаа оруулна уу"),
    ("contact.form.message", "Зурвас"),
    ("contact.form.messagePlaceholder", "Энд зурвасаа бичнэ үү"),
    ("contact.form.send", "Илгээх"),
    ("contact.form.cancel", "Цуцлах"),
    ("contact.form.success", "Баярлалаа! Таны зурвас илгээгдлээ."),
    ("contact.form.failed", "Зурвас илгээж чадсангүй"),
    // News
    ("news.tag", "Мэдээ, мэдээлэл"),
    ("news.title", "Сүүлийн үеийн мэдээ"),
    (
        "news.description",
        "Манай сүүлийн үеийн төслүүд, амжилтууд болон салбарын мэдээллийг авах.",
    ),
    ("news.readMore", "Дэлгэрэнгүй"),
    ("news.backToNews", "Мэдээ рүү буцах"),
    ("news.empty", "Одоогоор мэдээ нийтлэгдээгүй байна."),
    ("news.notFound", "Нийтлэл олдсонгүй"),
    ("news.share", "Энэ нийтлэлийг хуваалцах"),
    ("news.shareButton", "Хуваалцах"),
    ("news.related", "Холбоотой мэдээ"),
    ("news.attachment", "Хавсралт үзэх"),
    // Not found
    ("notFound.title", "Хуудас олдсонгүй"),
    (
        "notFound.description",
        "Таны хайсан хуудас байхгүй эсвэл шилжсэн байна.",
    ),
    ("notFound.home", "Нүүр хуудас руу буцах"),
    // Footer
    ("footer.certifications", "Гэрчилгээ"),
    ("footer.quickLinks", "Холбоосууд"),
    ("footer.contactInfo", "Холбоо барих"),
    ("footer.years", "15+ жилийн техникийн туршлага"),
    ("footer.rights", "Бүх эрх хуулиар хамгаалагдсан."),
];

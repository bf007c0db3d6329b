//! HTML rendering.
//!
//! Templates are compiled into the binary. Every page gets the base context
//! (language, navigation, footer details) and can call `t(key=..., lang=...)`
//! to resolve a translation key.

use crate::i18n::{Language, Locale, TranslationTable};
use crate::sections::{ContactDetails, CERTIFICATIONS, PERSONNEL_STANDARD};
use anyhow::{Context as _, Result};
use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as _;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("news.html", include_str!("../templates/news.html")),
    ("news_detail.html", include_str!("../templates/news_detail.html")),
    (
        "service_detail.html",
        include_str!("../templates/service_detail.html"),
    ),
    ("not_found.html", include_str!("../templates/not_found.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("admin/layout.html", include_str!("../templates/admin/layout.html")),
    ("admin/index.html", include_str!("../templates/admin/index.html")),
    (
        "admin/news_form.html",
        include_str!("../templates/admin/news_form.html"),
    ),
    (
        "admin/service_form.html",
        include_str!("../templates/admin/service_form.html"),
    ),
    (
        "admin/partner_form.html",
        include_str!("../templates/admin/partner_form.html"),
    ),
    (
        "admin/confirm_delete.html",
        include_str!("../templates/admin/confirm_delete.html"),
    ),
];

/// Phone number shown in the site header.
pub const HEADER_PHONE: &str = "+976-7015 7000";

#[derive(Debug, Serialize)]
struct NavLink {
    href: &'static str,
    key: &'static str,
}

const NAV_LINKS: [NavLink; 6] = [
    NavLink { href: "/#about", key: "nav.about" },
    NavLink { href: "/#services", key: "nav.services" },
    NavLink { href: "/#impact", key: "nav.impact" },
    NavLink { href: "/news", key: "nav.news" },
    NavLink { href: "/#partners", key: "nav.partners" },
    NavLink { href: "/#contact", key: "nav.contact" },
];

#[derive(Debug, Serialize)]
struct LanguageOption {
    code: &'static str,
    label: &'static str,
    native_name: &'static str,
    active: bool,
}

/// `t(key="nav.news", lang="mn")`; an unknown or missing `lang` means the
/// default language.
fn translate(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = args
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("t() requires a string `key`"))?;
    let language = args
        .get("lang")
        .and_then(Value::as_str)
        .and_then(|code| Language::from_code(code).ok())
        .unwrap_or_default();

    Ok(Value::String(
        TranslationTable::get().resolve(language, key).to_string(),
    ))
}

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .context("Failed to compile templates")?;
        tera.register_function("t", translate);
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera.render(template, context).map_err(|e| {
            let mut message = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!("\n  Caused by: {}", cause));
                source = cause.source();
            }
            anyhow::anyhow!(message)
        })
    }

    /// Variables every public page needs.
    pub fn base_context(locale: Locale, path: &str) -> Context {
        let mut context = Context::new();
        let language = locale.language();

        let languages: Vec<LanguageOption> = Language::enabled()
            .into_iter()
            .map(|l| LanguageOption {
                code: l.code(),
                label: l.toggle_label(),
                native_name: l.native_name(),
                active: l == language,
            })
            .collect();

        let mut footer_certifications: Vec<&str> = CERTIFICATIONS.to_vec();
        footer_certifications.push(PERSONNEL_STANDARD);

        context.insert("lang", locale.code());
        context.insert("languages", &languages);
        context.insert("path", path);
        context.insert("nav", &NAV_LINKS);
        context.insert("certifications", &CERTIFICATIONS);
        context.insert("footer_certifications", &footer_certifications);
        context.insert("contact", &ContactDetails::default());
        context.insert("header_phone", HEADER_PHONE);
        context.insert("year", &Utc::now().year());
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new().expect("templates should compile")
    }

    // ==================== Translation Function Tests ====================

    #[test]
    fn test_translate_resolves_per_language() {
        let mut args = HashMap::new();
        args.insert("key".to_string(), Value::from("nav.news"));
        args.insert("lang".to_string(), Value::from("mn"));
        assert_eq!(translate(&args).unwrap(), Value::from("Мэдээ"));

        args.insert("lang".to_string(), Value::from("fr"));
        assert_eq!(translate(&args).unwrap(), Value::from("News"));
    }

    #[test]
    fn test_translate_missing_key_falls_back() {
        let mut args = HashMap::new();
        args.insert("key".to_string(), Value::from("no.such.key"));
        assert_eq!(translate(&args).unwrap(), Value::from("no.such.key"));
    }

    #[test]
    fn test_translate_requires_key() {
        assert!(translate(&HashMap::new()).is_err());
    }

    // ==================== Page Tests ====================

    #[test]
    fn test_not_found_page_in_both_languages() {
        let renderer = renderer();

        let mut context = Renderer::base_context(Locale::new(Language::ENGLISH), "/news/x");
        context.insert("title_key", "news.notFound");
        context.insert("back_href", "/news");
        context.insert("back_key", "news.backToNews");
        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("Article not found"));
        assert!(html.contains("href=\"/news\""));

        let mut context = Renderer::base_context(Locale::new(Language::MONGOLIAN), "/news/x");
        context.insert("title_key", "news.notFound");
        context.insert("back_href", "/news");
        context.insert("back_key", "news.backToNews");
        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("Нийтлэл олдсонгүй"));
        assert!(html.contains("lang=\"mn\""));
    }

    #[test]
    fn test_templates_escape_html() {
        let renderer = renderer();
        let mut context = Context::new();
        context.insert("error", "<script>alert(1)</script>");
        context.insert("email", "");
        context.insert("lang", "en");
        let html = renderer.render("login.html", &context).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_is_error() {
        let err = renderer().render("missing.html", &Context::new()).unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }
}

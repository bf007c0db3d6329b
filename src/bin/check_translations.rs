//! Check the translation table for missing or suspicious entries.
//!
//! Usage: cargo run --bin check-translations
//!
//! Exits non-zero when a key is missing from any language.

use armos_site::i18n::{TranslationTable, TranslationValidator};

fn main() {
    let table = TranslationTable::get();
    let report = TranslationValidator::validate(table);

    println!(
        "Checked {} languages: {}",
        table.languages().len(),
        table.languages().join(", ")
    );

    for error in &report.errors {
        println!("ERROR   {}", error);
    }
    for warning in &report.warnings {
        println!("WARNING {}", warning);
    }

    if report.is_clean() {
        println!("All translations are consistent");
    } else {
        println!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    if report.has_errors() {
        std::process::exit(1);
    }
}

//! Invoice-number scan over extracted text

use regex::RegexBuilder;

/// Collect invoice-number candidates from extracted text.
///
/// Bare five-digit tokens win; when none appear, a labeled form
/// ("invoice no: 12345", "invoice number 12345", ...) is tried as a
/// fallback. Diagnostic only, the wire contract never carries these.
pub fn find_invoice_numbers(text: &str) -> Vec<String> {
    let bare = match regex::Regex::new(r"\b\d{5}\b") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let hits: Vec<String> = bare.find_iter(text).map(|m| m.as_str().to_string()).collect();
    if !hits.is_empty() {
        return hits;
    }

    let labeled = RegexBuilder::new(r"(?:invoice\s*(?:no(?:\.|:)?|number|num)?\s*:?\s*)(\d{5})")
        .case_insensitive(true)
        .build();
    match labeled {
        Ok(re) => re
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| vec![m.as_str().to_string()])
            .unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

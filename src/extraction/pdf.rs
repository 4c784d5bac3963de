//! PDF text extraction
//!
//! The primary pass parses the in-memory bytes with `pdf-extract`. For
//! locally sourced files an independent second pass can re-read the original
//! path with `lopdf` and scan the content streams directly; the two libraries
//! have different failure modes on malformed PDFs, so keeping both readings
//! gives a cross-check.

use std::path::Path;

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::extraction::wrap;
use crate::types::ExtractedText;

/// Extract text from PDF bytes.
///
/// `secondary` is populated only when `dual_extraction` is enabled and the
/// bytes came from disk (the second pass needs the original path to read).
/// A failed second pass logs and is dropped; it never fails the request.
pub fn extract_pdf(
    data: &[u8],
    source: &str,
    via_network: bool,
    config: &ExtractionConfig,
) -> Result<ExtractedText> {
    let raw = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::parse(source, e.to_string()))?;
    let primary = wrap(&raw, config.wrap_width);

    let secondary = if config.dual_extraction && !via_network {
        match extract_from_path(Path::new(source)) {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                tracing::debug!("secondary pdf pass on '{}' produced no text", source);
                None
            }
            Err(e) => {
                tracing::warn!("secondary pdf pass on '{}' failed: {}", source, e);
                None
            }
        }
    } else {
        None
    };

    Ok(ExtractedText { primary, secondary })
}

/// Second extraction strategy: load the document with `lopdf` and scan each
/// page's content streams for text-show operators.
fn extract_from_path(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;

    let mut all_text = String::new();
    for (page_num, page_id) in doc.get_pages() {
        match doc.get_page_content(page_id) {
            Ok(content) => {
                let text = scan_content_stream(&content);
                if !text.is_empty() {
                    all_text.push_str(&text);
                    all_text.push('\n');
                }
            }
            Err(e) => {
                tracing::debug!("could not get content for page {}: {}", page_num, e);
            }
        }
    }

    Ok(all_text)
}

/// Pull literal strings shown between BT/ET operators out of a content stream
fn scan_content_stream(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;
    let mut current_text = String::new();

    for line in content_str.lines() {
        let line = line.trim();

        if line == "BT" {
            in_text_block = true;
            continue;
        }

        if line == "ET" {
            in_text_block = false;
            if !current_text.is_empty() {
                text.push_str(&current_text);
                text.push(' ');
                current_text.clear();
            }
            continue;
        }

        if in_text_block && (line.ends_with("Tj") || line.ends_with("TJ")) {
            if let Some(start) = line.find('(') {
                if let Some(end) = line.rfind(')') {
                    let extracted = &line[start + 1..end];
                    let decoded = extracted
                        .replace("\\n", "\n")
                        .replace("\\r", "\r")
                        .replace("\\t", "\t")
                        .replace("\\(", "(")
                        .replace("\\)", ")")
                        .replace("\\\\", "\\");
                    current_text.push_str(&decoded);
                }
            }
        }
    }

    text
}

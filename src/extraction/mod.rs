//! Text extraction, dispatched by document kind

pub mod invoice;
pub mod pdf;
pub mod tabular;
pub mod word;
mod wrap;

pub use invoice::find_invoice_numbers;
pub use wrap::wrap;

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::types::{source_extension, DocumentKind, ExtractedText, FetchResult};

/// Run the extractor matching `kind` over fetched bytes
pub fn extract(
    kind: DocumentKind,
    fetched: &FetchResult,
    source: &str,
    config: &ExtractionConfig,
) -> Result<ExtractedText> {
    match kind {
        DocumentKind::Pdf => pdf::extract_pdf(
            &fetched.bytes,
            source,
            fetched.via_network,
            config,
        ),
        DocumentKind::Word => {
            word::extract_word(&fetched.bytes, config.wrap_width).map(ExtractedText::single)
        }
        DocumentKind::Spreadsheet => {
            tabular::extract_tabular(&fetched.bytes, &source_extension(source))
                .map(ExtractedText::single)
        }
        DocumentKind::Unsupported => Err(Error::UnsupportedFormat(source_extension(source))),
    }
}

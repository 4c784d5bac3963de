//! Word document text extraction

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::extraction::wrap;

/// Extract text from Word document bytes.
///
/// The bytes are spilled to a uniquely named temporary file and the document
/// is loaded from that path; the temp-file guard deletes it on every exit
/// path, so concurrent requests never collide and failures leave nothing
/// behind.
pub fn extract_word(data: &[u8], wrap_width: usize) -> Result<String> {
    let mut temp = tempfile::Builder::new()
        .prefix("docingest-")
        .suffix(".docx")
        .tempfile()?;
    temp.write_all(data)?;
    temp.flush()?;

    let text = load_document_text(temp.path())?;
    Ok(wrap(&text, wrap_width))
}

/// Load a .docx from disk and collect its paragraph text
fn load_document_text(path: &Path) -> Result<String> {
    let buf = std::fs::read(path)?;
    let doc = docx_rs::read_docx(&buf)
        .map_err(|e| Error::parse(path.display().to_string(), e.to_string()))?;

    let mut content = String::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            for child in p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            content.push_str(&t.text);
                        }
                    }
                }
            }
            content.push('\n');
        }
    }

    Ok(content)
}

//! Document Extractor
//!
//! File-to-text extraction, dispatched by extension:
//! - `.pdf` via `pdf-extract`, pages joined by blank lines
//! - `.docx` by walking `word/document.xml` with `quick-xml`, paragraphs
//!   joined by blank lines
//! - `.txt` / `.md` decoded as UTF-8 with lossy substitution

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::extension_of;

/// Extensions [`DocumentExtractor`] accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

/// Produces the text content of a file on disk.
pub trait Extractor: Send + Sync {
    fn extract(&self, path: &Path) -> AppResult<String>;
}

/// Default extractor for PDF, DOCX and plain-text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Whether `filename` has an extension this extractor handles.
    pub fn supports(filename: &str) -> bool {
        extension_of(filename)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

impl Extractor for DocumentExtractor {
    fn extract(&self, path: &Path) -> AppResult<String> {
        let ext = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(extension_of)
            .unwrap_or_default();

        let text = match ext.as_str() {
            "pdf" => extract_pdf(path)?,
            "docx" => extract_docx(path)?,
            "txt" | "md" => extract_plain(path)?,
            other => {
                return Err(AppError::unsupported(format!(
                    "unsupported file type '.{}' (supported: .pdf, .docx, .txt, .md)",
                    other
                )))
            }
        };

        debug!(path = %path.display(), chars = text.chars().count(), "extracted text");
        Ok(text)
    }
}

/// Extract PDF text; pdf-extract separates pages with form feeds.
pub fn extract_pdf(path: &Path) -> AppResult<String> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| AppError::extraction(format!("Failed to extract PDF text: {}", e)))?;

    Ok(text
        .split('\x0c')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Extract the paragraphs of a DOCX file.
pub fn extract_docx(path: &Path) -> AppResult<String> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::extraction(format!("Failed to open DOCX: {}", e)))?;

    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::extraction(format!("Failed to read DOCX as ZIP: {}", e)))?;

    let mut doc_xml = String::new();
    {
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|_| AppError::extraction("Invalid DOCX: missing word/document.xml"))?;
        entry
            .read_to_string(&mut doc_xml)
            .map_err(|e| AppError::extraction(format!("Failed to read document.xml: {}", e)))?;
    }

    paragraphs_from_document_xml(&doc_xml).map(|paragraphs| paragraphs.join("\n\n"))
}

/// Collect the non-empty `<w:p>` paragraphs of a WordprocessingML body.
fn paragraphs_from_document_xml(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                b"tab" => paragraph.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    let text = paragraph.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    paragraph.clear();
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| AppError::extraction(format!("XML parse error: {}", e)))?;
                paragraph.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::extraction(format!("XML parse error: {}", e))),
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Read a plain-text file, replacing invalid UTF-8.
pub fn extract_plain(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::extraction(format!("Failed to read text file: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

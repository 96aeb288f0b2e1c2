//! Page text extraction.
//!
//! A document is anything that can hand back the text of page N. Page 1
//! feeds the header extractors; every page feeds the flat line sequence.

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use std::fs;
use std::panic;
use std::path::Path;

use crate::parsers::HeaderExtractor;
use crate::types::{HeaderFields, RawLine};

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";
/// Maximum PDF file size (100 MB)
const MAX_PDF_SIZE: usize = 100 * 1024 * 1024;

/// Per-page text access
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (0-based) as a single string
    fn page_text(&self, index: usize) -> Result<String>;
}

impl<T: AsRef<str>> PageSource for [T] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.get(index)
            .map(|page| page.as_ref().to_string())
            .with_context(|| format!("page {} out of range", index + 1))
    }
}

impl<T: AsRef<str>> PageSource for Vec<T> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.as_slice().page_text(index)
    }
}

/// A PDF statement with its page text already pulled out.
///
/// The file is read and released inside [`PdfDocument::open`]; only the
/// extracted strings are kept.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("opening {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("reading {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate_pdf(bytes)?;

        // pdf-extract panics on some malformed files
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| anyhow!("PDF text extraction panicked"))?
            .map_err(|e| anyhow!("failed to extract text from PDF: {}", e))?;

        debug!("extracted {} pages", pages.len());
        Ok(Self { pages })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.pages.as_slice().page_text(index)
    }
}

fn validate_pdf(bytes: &[u8]) -> Result<()> {
    if bytes.len() < 8 {
        bail!("file too small to be a PDF ({} bytes)", bytes.len());
    }
    if bytes.len() > MAX_PDF_SIZE {
        bail!(
            "PDF too large ({} MB, max {} MB)",
            bytes.len() / (1024 * 1024),
            MAX_PDF_SIZE / (1024 * 1024)
        );
    }
    if !bytes.starts_with(PDF_MAGIC) {
        bail!("not a PDF: missing %PDF header");
    }
    Ok(())
}

/// Flat line sequence plus the cover-page header
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub lines: Vec<RawLine>,
    pub header: HeaderFields,
}

/// Pull every page's lines in document order and read the header from
/// page 1 only. A page whose text cannot be extracted counts as empty.
pub fn extract_text<S: PageSource + ?Sized>(source: &S, headers: &HeaderExtractor) -> ExtractedText {
    let mut out = ExtractedText::default();

    for page in 0..source.page_count() {
        let text = match source.page_text(page) {
            Ok(text) => text,
            Err(err) => {
                warn!("page {}: text extraction failed, treating as empty: {:#}", page + 1, err);
                String::new()
            }
        };
        debug!("processing page {} ({} bytes)", page + 1, text.len());

        if page == 0 {
            out.header = headers.extract(&text);
        }

        out.lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| RawLine {
                    page,
                    text: line.to_string(),
                }),
        );
    }

    out
}

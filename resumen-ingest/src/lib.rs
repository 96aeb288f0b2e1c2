//! resumen-ingest: statement text extraction, field parsers and the
//! transaction line classifier for Mastercard Argentina monthly statements.

pub mod extract;
pub mod parsers;
pub mod statement;
pub mod types;

pub use extract::{ExtractedText, PageSource, PdfDocument, extract_text};
pub use parsers::{HeaderExtractor, LineParser, parse_amount, parse_date};
pub use statement::{StatementParser, parse_statement_pdf};
pub use types::{
    Balance, HeaderFields, ParsedTransaction, RawLine, StatementPeriod, StatementSummary,
};

//! Whole-document pass: header, transactions, totals and the taxes residual.

use anyhow::Result;
use log::{debug, info, trace, warn};
use std::path::Path;

use crate::extract::{PageSource, PdfDocument, extract_text};
use crate::parsers::{HeaderExtractor, LineParser};
use crate::types::StatementSummary;

/// Statement parser with its patterns compiled once.
///
/// Holds no per-document state, so one parser can serve any number of
/// documents.
#[derive(Debug, Clone)]
pub struct StatementParser {
    headers: HeaderExtractor,
    lines: LineParser,
}

impl StatementParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            headers: HeaderExtractor::new()?,
            lines: LineParser::new()?,
        })
    }

    /// Parse an already-opened document. Line and field failures degrade
    /// to skipped lines and default values; this never fails.
    pub fn parse<S: PageSource + ?Sized>(&self, source: &S) -> StatementSummary {
        let extracted = extract_text(source, &self.headers);
        let header = &extracted.header;

        debug!(
            "SALDO ACTUAL: ${:.2} pesos, U$S {:.2}",
            header.current_balance.local, header.current_balance.foreign
        );
        debug!(
            "SALDO PENDIENTE: ${:.2} pesos, U$S {:.2}",
            header.prior_balance.local, header.prior_balance.foreign
        );

        let mut transactions = Vec::new();
        for line in &extracted.lines {
            match self.lines.parse(&line.text) {
                Some(txn) => {
                    debug!(
                        "page {} | {} | {:<35} | {} {:.2}",
                        line.page + 1,
                        txn.date(),
                        txn.merchant(),
                        txn.currency().symbol(),
                        txn.amount()
                    );
                    transactions.push(txn);
                }
                None => trace!("page {} | skipped: {}", line.page + 1, line.text),
            }
        }

        let summary = StatementSummary::new(extracted.header, transactions);

        info!(
            "parsed {} transactions: ${:.2} pesos, U$S {:.2}; taxes ${:.2} pesos, U$S {:.2}",
            summary.transactions().len(),
            summary.total_local(),
            summary.total_foreign(),
            summary.taxes_local(),
            summary.taxes_foreign()
        );
        if summary.taxes_local() < 0.0 || summary.taxes_foreign() < 0.0 {
            warn!("negative taxes residual; some statement lines were probably not recognized");
        }

        summary
    }

    /// Open and parse a PDF statement. Failing to open or read the file
    /// is the only error.
    pub fn parse_pdf(&self, path: impl AsRef<Path>) -> Result<StatementSummary> {
        let path = path.as_ref();
        info!("opening {}", path.display());
        let document = PdfDocument::open(path)?;
        Ok(self.parse(&document))
    }
}

/// Parse a Mastercard Argentina PDF statement.
pub fn parse_statement_pdf(path: impl AsRef<Path>) -> Result<StatementSummary> {
    StatementParser::new()?.parse_pdf(path)
}

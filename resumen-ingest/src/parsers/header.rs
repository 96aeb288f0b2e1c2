//! Cover-page header fields.
//!
//! Expected lines on page 1 (any order, any surrounding text):
//!   ESTADO DE CUENTA AL: 31-Dic-25
//!   PROXIMO CIERRE: 29-Ene-26        PROXIMO VENCIMIENTO: 11-Feb-26
//!   SALDO PENDIENTE     160594,67      0,00
//!   SALDO ACTUAL $ 3051644,80 U$S 488,62

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;

use super::amount::parse_amount;
use super::date::parse_date;
use crate::types::{Balance, HeaderFields};

/// Compiled anchors for each header label. Every extractor scans the
/// whole page on its own and falls back to zero / `None` when its label
/// is missing.
#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    current_balance_re: Regex,
    prior_balance_re: Regex,
    statement_date_re: Regex,
    next_closing_re: Regex,
    next_due_re: Regex,
}

impl HeaderExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            current_balance_re: Regex::new(
                r"(?i)SALDO ACTUAL\s*\$?\s*(?P<local>-?[\d.,]+)\s*U\$S\s*(?P<foreign>-?[\d.,]+)",
            )?,
            prior_balance_re: Regex::new(
                r"(?i)SALDO PENDIENTE\s+(?P<local>-?[\d.,]+)\s+(?P<foreign>-?[\d.,]+)",
            )?,
            statement_date_re: Regex::new(
                r"(?i)ESTADO DE CUENTA AL:\s*(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})",
            )?,
            next_closing_re: Regex::new(
                r"(?i)PROXIMO\s*CIERRE:\s*(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})",
            )?,
            next_due_re: Regex::new(
                r"(?i)PROXIMO\s*VENCIMIENTO:\s*(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})",
            )?,
        })
    }

    /// Run every header extractor over the cover page text.
    pub fn extract(&self, text: &str) -> HeaderFields {
        HeaderFields {
            current_balance: self.current_balance(text),
            prior_balance: self.prior_balance(text),
            statement_date: self.statement_date(text),
            next_closing_date: self.next_closing_date(text),
            next_due_date: self.next_due_date(text),
        }
    }

    /// SALDO ACTUAL, pesos then dollars
    pub fn current_balance(&self, text: &str) -> Balance {
        balance_pair(&self.current_balance_re, text)
    }

    /// SALDO PENDIENTE, the balance carried from the previous statement
    pub fn prior_balance(&self, text: &str) -> Balance {
        balance_pair(&self.prior_balance_re, text)
    }

    /// ESTADO DE CUENTA AL
    pub fn statement_date(&self, text: &str) -> Option<NaiveDate> {
        labelled_date(&self.statement_date_re, text)
    }

    /// PROXIMO CIERRE
    pub fn next_closing_date(&self, text: &str) -> Option<NaiveDate> {
        labelled_date(&self.next_closing_re, text)
    }

    /// PROXIMO VENCIMIENTO
    pub fn next_due_date(&self, text: &str) -> Option<NaiveDate> {
        labelled_date(&self.next_due_re, text)
    }
}

fn balance_pair(re: &Regex, text: &str) -> Balance {
    match re.captures(text) {
        Some(caps) => Balance {
            local: parse_amount(&caps["local"]),
            foreign: parse_amount(&caps["foreign"]),
        },
        None => Balance::default(),
    }
}

fn labelled_date(re: &Regex, text: &str) -> Option<NaiveDate> {
    let caps = re.captures(text)?;
    parse_date(&caps["date"])
}

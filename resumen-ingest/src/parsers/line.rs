//! Transaction line classifier.
//!
//! Expected text rows after PDF-to-text:
//!   26-Nov-25 GOOGLE *YouTube (USA,ARS, 600,00) 00761 0,41      <- dollars
//!   30-Nov-25 PUPPIS 02842 46500,00                             <- pesos
//!   13-Dic-25 NETFLIX.COM (USA,ARS, 25398,00) 00779 17,63      <- dollars
//!
//! Each line goes through the same steps with no state carried between
//! lines: noise filter, shape filter, currency, amount, coupon/merchant.

use anyhow::Result;
use regex::{Match, Regex};
use resumen_core::Currency;

use super::amount::parse_amount;
use super::date::parse_date;
use crate::types::ParsedTransaction;

/// Summary and subtotal rows that share the transaction shape
const NOISE_FRAGMENTS: &[&str] = &[
    "total titular",
    "total adicional",
    "saldo actual",
    "pago minimo",
    "detalle del mes",
    "su pago",
    "transfer financ",
];

/// Dollar lines carry an exchange annotation like `(USA,ARS, 600,00)`
const FOREIGN_MARKER: &str = "USA,";

const COUPON_LEN: usize = 5;

/// True for accounting summary rows that must never become transactions.
pub fn is_noise(line: &str) -> bool {
    let lower = line.to_lowercase();
    NOISE_FRAGMENTS.iter().any(|fragment| lower.contains(fragment))
}

/// Currency of the text following the date.
pub fn classify_currency(rest: &str) -> Currency {
    if rest.to_uppercase().contains(FOREIGN_MARKER) {
        Currency::Foreign
    } else {
        Currency::Local
    }
}

fn is_coupon(token: &str) -> bool {
    token.len() == COUPON_LEN && token.bytes().all(|b| b.is_ascii_digit())
}

/// Split the text before the amount into merchant and coupon reference.
///
/// The coupon is a standalone 5-digit token directly in front of the
/// amount. Without one, the whole prefix is the merchant.
pub fn split_merchant_and_coupon(before_amount: &str) -> (String, Option<String>) {
    if before_amount.ends_with(char::is_whitespace) {
        let head = before_amount.trim_end();
        if let Some(idx) = head.rfind(char::is_whitespace) {
            let token = head[idx..].trim_start();
            if is_coupon(token) {
                return (normalize_merchant(&head[..idx]), Some(token.to_string()));
            }
        }
    }
    (normalize_merchant(before_amount), None)
}

/// Collapse whitespace runs and drop a leftover trailing coupon token.
pub fn normalize_merchant(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.rsplit_once(' ') {
        Some((head, last)) if is_coupon(last) => head.to_string(),
        _ => collapsed,
    }
}

/// Compiled shape and amount patterns for transaction lines.
#[derive(Debug, Clone)]
pub struct LineParser {
    shape_re: Regex,
    amount_re: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            shape_re: Regex::new(r"^(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})\s+(?P<rest>\S.*)$")?,
            // Thousands-grouped first so `1.234,56` is taken whole.
            amount_re: Regex::new(r"-?\d{1,3}(?:\.\d{3})+,\d+|-?\d+[.,]\d+")?,
        })
    }

    /// Split a line into its leading date token and the remainder.
    /// Lines that do not start with `DD-Mmm-YY` return `None`.
    pub fn split_date<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.shape_re.captures(line.trim())?;
        let date = caps.name("date")?.as_str();
        let rest = caps.name("rest")?.as_str().trim_end();
        Some((date, rest))
    }

    /// The last amount-shaped token in the remainder. Earlier numbers are
    /// exchange annotations; the charged amount always comes last.
    pub fn last_amount<'a>(&self, rest: &'a str) -> Option<Match<'a>> {
        self.amount_re.find_iter(rest).last()
    }

    /// Parse one physical line. Anything that is not a transaction
    /// (noise, wrong shape, bad date, no amount, zero amount) yields `None`.
    pub fn parse(&self, line: &str) -> Option<ParsedTransaction> {
        if is_noise(line) {
            return None;
        }

        let (date_token, rest) = self.split_date(line)?;
        let date = parse_date(date_token)?;
        let currency = classify_currency(rest);

        let amount_match = self.last_amount(rest)?;
        let amount = parse_amount(amount_match.as_str());
        // A zero row carries no currency; it would break the one-amount rule.
        if amount == 0.0 {
            return None;
        }

        let (merchant, coupon) = split_merchant_and_coupon(&rest[..amount_match.start()]);

        Some(ParsedTransaction::new(date, merchant, coupon, amount, currency))
    }
}

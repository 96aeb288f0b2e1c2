use chrono::{Datelike, NaiveDate};
use resumen_core::Currency;
use serde::Serialize;

/// One trimmed, non-empty line of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 0-based page the line came from
    pub page: usize,
    pub text: String,
}

/// A declared balance split by currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Balance {
    pub local: f64,
    pub foreign: f64,
}

/// Header values read from the cover page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderFields {
    /// SALDO ACTUAL
    pub current_balance: Balance,
    /// SALDO PENDIENTE (carried over from the previous period)
    pub prior_balance: Balance,
    /// ESTADO DE CUENTA AL
    pub statement_date: Option<NaiveDate>,
    /// PROXIMO CIERRE
    pub next_closing_date: Option<NaiveDate>,
    /// PROXIMO VENCIMIENTO
    pub next_due_date: Option<NaiveDate>,
}

/// A single statement line, denominated in exactly one currency.
///
/// Only the amount for the classified currency is set; the other stays at
/// zero. Fields are private so the flag and the amounts cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTransaction {
    date: NaiveDate,
    merchant: String,
    coupon_reference: Option<String>,
    amount_local_currency: f64,
    amount_foreign_currency: f64,
    is_foreign_currency: bool,
}

impl ParsedTransaction {
    pub fn new(
        date: NaiveDate,
        merchant: impl Into<String>,
        coupon_reference: Option<String>,
        amount: f64,
        currency: Currency,
    ) -> Self {
        let (amount_local_currency, amount_foreign_currency) = match currency {
            Currency::Local => (amount, 0.0),
            Currency::Foreign => (0.0, amount),
        };
        Self {
            date,
            merchant: merchant.into(),
            coupon_reference,
            amount_local_currency,
            amount_foreign_currency,
            is_foreign_currency: currency.is_foreign(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn coupon_reference(&self) -> Option<&str> {
        self.coupon_reference.as_deref()
    }

    pub fn amount_local_currency(&self) -> f64 {
        self.amount_local_currency
    }

    pub fn amount_foreign_currency(&self) -> f64 {
        self.amount_foreign_currency
    }

    pub fn is_foreign_currency(&self) -> bool {
        self.is_foreign_currency
    }

    pub fn currency(&self) -> Currency {
        if self.is_foreign_currency {
            Currency::Foreign
        } else {
            Currency::Local
        }
    }

    /// The amount in whichever currency the line is denominated in
    pub fn amount(&self) -> f64 {
        match self.currency() {
            Currency::Local => self.amount_local_currency,
            Currency::Foreign => self.amount_foreign_currency,
        }
    }
}

/// Month and year a statement covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub month: u32,
    pub year: i32,
}

/// Everything parsed from one statement document.
///
/// Totals and the taxes residual are computed in [`StatementSummary::new`]
/// and never parsed. Residuals can be negative when lines were missed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementSummary {
    current_balance: Balance,
    prior_balance: Balance,
    transactions: Vec<ParsedTransaction>,
    total_local: f64,
    total_foreign: f64,
    taxes_local: f64,
    taxes_foreign: f64,
    statement_date: Option<NaiveDate>,
    next_closing_date: Option<NaiveDate>,
    next_due_date: Option<NaiveDate>,
    period: Option<StatementPeriod>,
}

impl StatementSummary {
    pub fn new(header: HeaderFields, transactions: Vec<ParsedTransaction>) -> Self {
        let total_local: f64 = transactions.iter().map(|t| t.amount_local_currency).sum();
        let total_foreign: f64 = transactions.iter().map(|t| t.amount_foreign_currency).sum();

        // Impuestos = saldo actual - consumos - saldo pendiente
        let taxes_local = header.current_balance.local - total_local - header.prior_balance.local;
        let taxes_foreign =
            header.current_balance.foreign - total_foreign - header.prior_balance.foreign;

        let period = header.statement_date.map(|d| StatementPeriod {
            month: d.month(),
            year: d.year(),
        });

        Self {
            current_balance: header.current_balance,
            prior_balance: header.prior_balance,
            transactions,
            total_local,
            total_foreign,
            taxes_local,
            taxes_foreign,
            statement_date: header.statement_date,
            next_closing_date: header.next_closing_date,
            next_due_date: header.next_due_date,
            period,
        }
    }

    pub fn current_balance(&self) -> Balance {
        self.current_balance
    }

    pub fn prior_balance(&self) -> Balance {
        self.prior_balance
    }

    pub fn transactions(&self) -> &[ParsedTransaction] {
        &self.transactions
    }

    pub fn total_local(&self) -> f64 {
        self.total_local
    }

    pub fn total_foreign(&self) -> f64 {
        self.total_foreign
    }

    pub fn taxes_local(&self) -> f64 {
        self.taxes_local
    }

    pub fn taxes_foreign(&self) -> f64 {
        self.taxes_foreign
    }

    pub fn statement_date(&self) -> Option<NaiveDate> {
        self.statement_date
    }

    pub fn next_closing_date(&self) -> Option<NaiveDate> {
        self.next_closing_date
    }

    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.next_due_date
    }

    pub fn period(&self) -> Option<StatementPeriod> {
        self.period
    }
}

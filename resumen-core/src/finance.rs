//! Persisted statement and transaction records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Currency a statement line is denominated in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Pesos, the issuer's home currency
    #[serde(rename = "ARS")]
    Local,
    /// Dollars, printed on lines carrying the `USA,` annotation
    #[serde(rename = "USD")]
    Foreign,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Local => "ARS",
            Currency::Foreign => "USD",
        }
    }

    /// Symbol used on the statement itself
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Local => "$",
            Currency::Foreign => "U$S",
        }
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self, Currency::Foreign)
    }
}

/// Spending categories assigned by keyword rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Entretenimiento")]
    Entertainment,
    #[serde(rename = "Educación")]
    Education,
    #[serde(rename = "Compras")]
    Shopping,
    #[serde(rename = "Comida y Restaurantes")]
    Food,
    #[serde(rename = "Tecnología")]
    Technology,
    #[serde(rename = "Transporte")]
    Transport,
    #[serde(rename = "Servicios")]
    Utilities,
    #[serde(rename = "Salud")]
    Health,
    #[serde(rename = "Mascotas")]
    Pets,
    #[serde(rename = "Pagos Digitales")]
    DigitalPayments,
    #[serde(rename = "Suscripciones")]
    Subscriptions,
    #[serde(rename = "Impuestos")]
    Taxes,
    #[serde(rename = "Otros")]
    Other,
}

impl Category {
    /// Display label as shown to the cardholder
    pub fn label(&self) -> &'static str {
        match self {
            Category::Entertainment => "Entretenimiento",
            Category::Education => "Educación",
            Category::Shopping => "Compras",
            Category::Food => "Comida y Restaurantes",
            Category::Technology => "Tecnología",
            Category::Transport => "Transporte",
            Category::Utilities => "Servicios",
            Category::Health => "Salud",
            Category::Pets => "Mascotas",
            Category::DigitalPayments => "Pagos Digitales",
            Category::Subscriptions => "Suscripciones",
            Category::Taxes => "Impuestos",
            Category::Other => "Otros",
        }
    }
}

/// A persisted statement header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementRecord {
    pub id: u64,
    /// Name of the uploaded document
    pub filename: String,
    /// Month covered (1-12)
    pub month: u32,
    pub year: i32,
    /// Declared current balance in pesos
    pub total_local: f64,
    /// Declared current balance in dollars
    pub total_foreign: f64,
    /// Caller-supplied pesos per dollar at import time
    pub exchange_rate: f64,
    pub statement_date: Option<NaiveDate>,
    pub next_closing_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub transaction_count: usize,
}

/// A persisted transaction row, one per currency amount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: u64,
    pub statement_id: u64,
    pub date: NaiveDate,
    pub merchant: String,
    /// Always stored as an absolute value
    pub amount: f64,
    pub currency: Currency,
    pub category: Category,
    pub description: Option<String>,
}

impl TransactionRecord {
    pub fn is_foreign(&self) -> bool {
        self.currency.is_foreign()
    }

    /// Amount converted to pesos at the given rate
    pub fn amount_in_local(&self, exchange_rate: f64) -> f64 {
        match self.currency {
            Currency::Local => self.amount,
            Currency::Foreign => self.amount * exchange_rate,
        }
    }
}

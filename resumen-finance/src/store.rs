//! Statement import: turns a parsed summary into persisted records.
//!
//! The parser only reports the taxes residual; deciding whether it is big
//! enough to book as its own "Impuestos y Cargos" row happens here.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use resumen_core::{Category, Currency, StatementRecord, TransactionRecord};
use resumen_ingest::StatementSummary;
use serde::Serialize;

use crate::category_rules::categorize;

/// Residuals at or below this many pesos are not booked.
pub const DEFAULT_MATERIALITY_THRESHOLD: f64 = 100.0;

pub const TAXES_MERCHANT: &str = "Impuestos y Cargos del Resumen";
pub const TAXES_DESCRIPTION: &str =
    "Calculado automáticamente (diferencia entre saldo y transacciones)";

/// Statement header before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewStatement {
    pub filename: String,
    pub month: u32,
    pub year: i32,
    pub total_local: f64,
    pub total_foreign: f64,
    pub exchange_rate: f64,
    pub statement_date: Option<NaiveDate>,
    pub next_closing_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
}

/// Transaction row before ids are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub currency: Currency,
    pub category: Category,
    pub description: Option<String>,
}

/// A statement and its rows as persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredStatement {
    pub statement: StatementRecord,
    pub transactions: Vec<TransactionRecord>,
}

/// Persistence for imported statements. Implementations assign the
/// statement id and one id per transaction row.
pub trait StatementStore {
    fn save(
        &mut self,
        statement: NewStatement,
        transactions: Vec<NewTransaction>,
    ) -> Result<StoredStatement>;
}

/// In-process store with sequential ids
#[derive(Debug, Default)]
pub struct MemoryStore {
    statements: Vec<StatementRecord>,
    transactions: Vec<TransactionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &[StatementRecord] {
        &self.statements
    }

    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn transactions_for(&self, statement_id: u64) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions
            .iter()
            .filter(move |t| t.statement_id == statement_id)
    }
}

impl StatementStore for MemoryStore {
    fn save(
        &mut self,
        statement: NewStatement,
        transactions: Vec<NewTransaction>,
    ) -> Result<StoredStatement> {
        if !(1..=12).contains(&statement.month) {
            bail!("invalid statement month {}", statement.month);
        }

        let statement_id = self.statements.len() as u64 + 1;
        let first_txn_id = self.transactions.len() as u64 + 1;

        let record = StatementRecord {
            id: statement_id,
            filename: statement.filename,
            month: statement.month,
            year: statement.year,
            total_local: statement.total_local,
            total_foreign: statement.total_foreign,
            exchange_rate: statement.exchange_rate,
            statement_date: statement.statement_date,
            next_closing_date: statement.next_closing_date,
            next_due_date: statement.next_due_date,
            transaction_count: transactions.len(),
        };

        let rows: Vec<TransactionRecord> = transactions
            .into_iter()
            .enumerate()
            .map(|(i, t)| TransactionRecord {
                id: first_txn_id + i as u64,
                statement_id,
                date: t.date,
                merchant: t.merchant,
                amount: t.amount,
                currency: t.currency,
                category: t.category,
                description: t.description,
            })
            .collect();

        self.statements.push(record.clone());
        self.transactions.extend(rows.iter().cloned());

        Ok(StoredStatement {
            statement: record,
            transactions: rows,
        })
    }
}

/// Caller-supplied import settings
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub filename: String,
    /// Pesos per dollar ("dólar tarjeta") at import time
    pub exchange_rate: f64,
    pub materiality_threshold: f64,
    /// Fallback for the statement period and the taxes row date
    pub imported_on: NaiveDate,
}

impl ImportOptions {
    pub fn new(filename: impl Into<String>, imported_on: NaiveDate) -> Self {
        Self {
            filename: filename.into(),
            exchange_rate: 0.0,
            materiality_threshold: DEFAULT_MATERIALITY_THRESHOLD,
            imported_on,
        }
    }

    pub fn with_exchange_rate(mut self, rate: f64) -> Self {
        self.exchange_rate = rate;
        self
    }

    pub fn with_materiality_threshold(mut self, threshold: f64) -> Self {
        self.materiality_threshold = threshold;
        self
    }
}

/// Outcome of one import
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub stored: StoredStatement,
    /// Sum of peso rows, including a booked taxes row
    pub total_local: f64,
    pub total_foreign: f64,
    pub taxes_booked: bool,
}

impl ImportReport {
    pub fn statement_id(&self) -> u64 {
        self.stored.statement.id
    }

    pub fn transactions_imported(&self) -> usize {
        self.stored.transactions.len()
    }
}

/// Build the rows for one parsed statement, without persisting them.
pub fn build_transactions(summary: &StatementSummary, options: &ImportOptions) -> Vec<NewTransaction> {
    let mut rows = Vec::new();

    for txn in summary.transactions() {
        let description = txn.coupon_reference().map(|c| format!("Cupón: {}", c));

        if txn.amount_local_currency() != 0.0 {
            rows.push(NewTransaction {
                date: txn.date(),
                merchant: txn.merchant().to_string(),
                amount: txn.amount_local_currency().abs(),
                currency: Currency::Local,
                category: categorize(txn.merchant()),
                description: description.clone(),
            });
        }

        // Dollar charges on this card are almost always subscriptions
        if txn.amount_foreign_currency() != 0.0 {
            rows.push(NewTransaction {
                date: txn.date(),
                merchant: txn.merchant().to_string(),
                amount: txn.amount_foreign_currency().abs(),
                currency: Currency::Foreign,
                category: Category::Subscriptions,
                description,
            });
        }
    }

    if summary.taxes_local().abs() > options.materiality_threshold {
        rows.push(NewTransaction {
            date: summary.statement_date().unwrap_or(options.imported_on),
            merchant: TAXES_MERCHANT.to_string(),
            amount: summary.taxes_local().abs(),
            currency: Currency::Local,
            category: Category::Taxes,
            description: Some(TAXES_DESCRIPTION.to_string()),
        });
    }

    rows
}

/// Import a parsed statement into `store`.
pub fn import_statement<S: StatementStore + ?Sized>(
    store: &mut S,
    summary: &StatementSummary,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let (month, year) = match summary.period() {
        Some(period) => (period.month, period.year),
        None => (options.imported_on.month(), options.imported_on.year()),
    };

    let header = NewStatement {
        filename: options.filename.clone(),
        month,
        year,
        total_local: summary.current_balance().local,
        total_foreign: summary.current_balance().foreign,
        exchange_rate: options.exchange_rate,
        statement_date: summary.statement_date(),
        next_closing_date: summary.next_closing_date(),
        next_due_date: summary.next_due_date(),
    };

    let rows = build_transactions(summary, options);
    let taxes_booked = rows.iter().any(|r| r.category == Category::Taxes);
    debug!("{} rows built for {}", rows.len(), options.filename);

    let stored = store.save(header, rows)?;

    let total_local: f64 = stored
        .transactions
        .iter()
        .filter(|t| !t.is_foreign())
        .map(|t| t.amount)
        .sum();
    let total_foreign: f64 = stored
        .transactions
        .iter()
        .filter(|t| t.is_foreign())
        .map(|t| t.amount)
        .sum();

    info!(
        "created statement {} with {} transactions (${:.2} pesos, U$S {:.2})",
        stored.statement.id,
        stored.transactions.len(),
        total_local,
        total_foreign
    );

    Ok(ImportReport {
        stored,
        total_local,
        total_foreign,
        taxes_booked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumen_ingest::StatementParser;

    fn summary_of(page: &str) -> StatementSummary {
        StatementParser::new().unwrap().parse(&vec![page])
    }

    fn options() -> ImportOptions {
        ImportOptions::new("resumen.pdf", NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
            .with_exchange_rate(1450.0)
    }

    #[test]
    fn test_small_residual_is_not_booked() {
        let summary = summary_of("SALDO ACTUAL $ 1.550,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00");
        assert_eq!(summary.taxes_local(), 50.0);

        let rows = build_transactions(&summary, &options());
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.category != Category::Taxes));
    }

    #[test]
    fn test_material_residual_is_booked() {
        let summary = summary_of(
            "ESTADO DE CUENTA AL: 31-Dic-25\nSALDO ACTUAL $ 2.000,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00",
        );
        let rows = build_transactions(&summary, &options());
        assert_eq!(rows.len(), 2);

        let taxes = &rows[1];
        assert_eq!(taxes.merchant, TAXES_MERCHANT);
        assert_eq!(taxes.amount, 500.0);
        assert_eq!(taxes.category, Category::Taxes);
        assert_eq!(taxes.date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    fn taxes_rows(page: &str, options: &ImportOptions) -> usize {
        build_transactions(&summary_of(page), options)
            .iter()
            .filter(|r| r.category == Category::Taxes)
            .count()
    }

    #[test]
    fn test_residual_equal_to_threshold_is_not_booked() {
        let page = "SALDO ACTUAL $ 1.600,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";
        assert_eq!(summary_of(page).taxes_local(), 100.0);
        assert_eq!(taxes_rows(page, &options()), 0);

        let page = "SALDO ACTUAL $ 1.600,01 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";
        assert_eq!(taxes_rows(page, &options()), 1);
    }

    #[test]
    fn test_custom_threshold_boundary() {
        let opts = options().with_materiality_threshold(250.0);

        let at = "SALDO ACTUAL $ 1.750,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";
        assert_eq!(summary_of(at).taxes_local(), 250.0);
        assert_eq!(taxes_rows(at, &opts), 0);

        let above = "SALDO ACTUAL $ 1.750,50 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";
        assert_eq!(taxes_rows(above, &opts), 1);
        // Below the custom threshold but above the default one
        let between = "SALDO ACTUAL $ 1.700,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";
        assert_eq!(taxes_rows(between, &opts), 0);
        assert_eq!(taxes_rows(between, &options()), 1);
    }

    #[test]
    fn test_negative_residual_books_absolute_value() {
        let summary = summary_of("SALDO ACTUAL $ 1.000,00 U$S 0,00\n26-Nov-25 COTO 00001 1500,00");
        assert_eq!(summary.taxes_local(), -500.0);

        let rows = build_transactions(&summary, &options());
        let taxes = rows.iter().find(|r| r.category == Category::Taxes).unwrap();
        assert_eq!(taxes.amount, 500.0);
        // No statement date: falls back to the import day
        assert_eq!(taxes.date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn test_dollar_rows_are_subscriptions() {
        let summary = summary_of("13-Dic-25 NETFLIX.COM (USA,ARS, 25398,00) 00779 17,63\nSALDO ACTUAL $ 0,00 U$S 17,63");
        let rows = build_transactions(&summary, &options());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].currency, Currency::Foreign);
        assert_eq!(rows[0].category, Category::Subscriptions);
        assert_eq!(rows[0].description.as_deref(), Some("Cupón: 00779"));
    }

    #[test]
    fn test_memory_store_assigns_ids() {
        let mut store = MemoryStore::new();
        let page = "SALDO ACTUAL $ 1.500,00 U$S 0,00\n26-Nov-25 NETFLIX.COM 00779 1500,00";

        let first = import_statement(&mut store, &summary_of(page), &options()).unwrap();
        let second = import_statement(&mut store, &summary_of(page), &options()).unwrap();

        assert_eq!(first.statement_id(), 1);
        assert_eq!(second.statement_id(), 2);
        assert_eq!(second.stored.transactions[0].id, 2);
        assert_eq!(store.transactions_for(2).count(), 1);
        assert_eq!(store.statements().len(), 2);
    }

    #[test]
    fn test_period_falls_back_to_import_date() {
        let mut store = MemoryStore::new();
        let summary = summary_of("SALDO ACTUAL $ 0,00 U$S 0,00");
        let report = import_statement(&mut store, &summary, &options()).unwrap();
        assert_eq!(report.stored.statement.month, 1);
        assert_eq!(report.stored.statement.year, 2026);
        assert_eq!(report.transactions_imported(), 0);
        assert!(!report.taxes_booked);
    }
}

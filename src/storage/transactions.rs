//! Transaction repository
//!
//! Maps between `Transaction` and its row in the Transactions table. Per-user
//! reads are the hottest path in the application, so listings go through the
//! TTL cache; every write invalidates the owning user's entry.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{FinDashError, FinDashResult};
use crate::models::{CategorySource, Transaction, TransactionId, UserId, UNCATEGORIZED};

use super::cache::TtlCache;
use super::codec;
use super::table::{tables, TableBackend};

/// Repository for transaction rows with cached per-user listings
pub struct TransactionRepository {
    backend: Arc<dyn TableBackend>,
    cache: TtlCache<Vec<Transaction>>,
}

impl TransactionRepository {
    pub fn new(backend: Arc<dyn TableBackend>, cache_ttl: Duration) -> Self {
        Self {
            backend,
            cache: TtlCache::new(cache_ttl),
        }
    }

    fn to_row(txn: &Transaction) -> Vec<String> {
        vec![
            txn.user_id.to_string(),
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.payee.clone(),
            codec::encode_cents(txn.amount),
            txn.category_name().to_string(),
            txn.category_source.as_str().to_string(),
            txn.account_name.clone(),
            txn.account_id.clone(),
            txn.notes.clone(),
            codec::encode_bool(txn.pending),
            codec::encode_datetime(txn.created_at),
            codec::encode_datetime(txn.modified_at),
        ]
    }

    fn from_row(row: &[String]) -> FinDashResult<Transaction> {
        let t = &tables::TRANSACTIONS;
        let category = t.cell(row, "category")?;
        let source = t.cell(row, "category_source")?;
        Ok(Transaction {
            id: TransactionId::parse(t.cell(row, "transaction_id")?).map_err(|e| {
                FinDashError::Store(format!("Bad transaction_id in Transactions: {}", e))
            })?,
            user_id: UserId::parse(t.cell(row, "user_id")?)
                .map_err(|e| FinDashError::Store(format!("Bad user_id in Transactions: {}", e)))?,
            date: codec::parse_date(t.name, t.cell(row, "date")?)?,
            payee: t.cell(row, "payee")?.to_string(),
            amount: codec::parse_cents(t.name, t.cell(row, "amount")?)?,
            category: (!category.is_empty() && category != UNCATEGORIZED)
                .then(|| category.to_string()),
            category_source: CategorySource::parse(source).ok_or_else(|| {
                FinDashError::Store(format!("Bad category_source in Transactions: {}", source))
            })?,
            account_name: t.cell(row, "account_name")?.to_string(),
            account_id: t.cell(row, "account_id")?.to_string(),
            notes: t.cell(row, "notes")?.to_string(),
            pending: codec::parse_bool(t.name, t.cell(row, "pending")?)?,
            created_at: codec::parse_datetime(t.name, t.cell(row, "created_at")?)?,
            modified_at: codec::parse_datetime(t.name, t.cell(row, "modified_at")?)?,
        })
    }

    /// All transactions for a user, newest first (creation order breaks date
    /// ties). Served from the cache inside the freshness window.
    pub fn list_for_user(&self, user_id: UserId) -> FinDashResult<Vec<Transaction>> {
        if let Some(cached) = self.cache.get(user_id) {
            return Ok(cached);
        }

        let t = &tables::TRANSACTIONS;
        let key = user_id.to_string();
        let mut transactions = Vec::new();
        for row in self.backend.rows(t.name)? {
            if t.cell(&row, "user_id")? == key {
                transactions.push(Self::from_row(&row)?);
            }
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        self.cache.put(user_id, transactions.clone());
        Ok(transactions)
    }

    /// Fetch one transaction, checking ownership
    pub fn get(&self, user_id: UserId, id: TransactionId) -> FinDashResult<Transaction> {
        self.list_for_user(user_id)?
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or_else(|| FinDashError::transaction_not_found(id.to_string()))
    }

    /// Append one transaction
    pub fn append(&self, txn: &Transaction) -> FinDashResult<()> {
        self.backend
            .append_row(tables::TRANSACTIONS.name, Self::to_row(txn))?;
        self.cache.invalidate(txn.user_id);
        Ok(())
    }

    /// Append a batch of transactions in one durable write
    pub fn append_many(&self, txns: &[Transaction]) -> FinDashResult<()> {
        if txns.is_empty() {
            return Ok(());
        }
        self.backend.append_rows(
            tables::TRANSACTIONS.name,
            txns.iter().map(Self::to_row).collect(),
        )?;
        for txn in txns {
            self.cache.invalidate(txn.user_id);
        }
        Ok(())
    }

    /// Rewrite one transaction's row
    pub fn update(&self, txn: &Transaction) -> FinDashResult<()> {
        self.backend.update_row(
            tables::TRANSACTIONS.name,
            "transaction_id",
            &txn.id.to_string(),
            Self::to_row(txn),
        )?;
        self.cache.invalidate(txn.user_id);
        Ok(())
    }

    /// Rewrite a batch of transaction rows in one durable write
    pub fn update_many(&self, txns: &[Transaction]) -> FinDashResult<()> {
        if txns.is_empty() {
            return Ok(());
        }
        self.backend.update_rows(
            tables::TRANSACTIONS.name,
            "transaction_id",
            txns.iter()
                .map(|txn| (txn.id.to_string(), Self::to_row(txn)))
                .collect(),
        )?;
        for txn in txns {
            self.cache.invalidate(txn.user_id);
        }
        Ok(())
    }
}

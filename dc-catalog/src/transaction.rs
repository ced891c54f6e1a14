// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Transaction bookkeeping for read-only catalogs
//!
//! A transaction exists from start until commit or rollback. There are no
//! staged writes, so commit and rollback both just deregister it.

use dc_common::utils::current_timestamp_ms;
use dc_common::{Result, TransactionId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::host::ClientContext;
use crate::manager::TransactionManager;

/// Lightweight transaction handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction ID, unique within its registry
    pub id: TransactionId,

    /// Catalog the transaction belongs to
    pub catalog_name: String,

    /// Start time (milliseconds)
    pub start_time: u64,
}

/// Tracks live transactions of one attached catalog
#[derive(Debug)]
pub struct TransactionRegistry {
    catalog_name: String,
    next_id: AtomicU64,
    transactions: Mutex<HashMap<TransactionId, Arc<Transaction>>>,
}

impl TransactionRegistry {
    pub fn new(catalog_name: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            next_id: AtomicU64::new(1),
            transactions: Mutex::new(HashMap::new()),
        }
    }

    pub fn active_count(&self) -> usize {
        self.transactions.lock().len()
    }

    pub fn is_active(&self, id: TransactionId) -> bool {
        self.transactions.lock().contains_key(&id)
    }

    fn remove(&self, transaction: &Transaction) {
        self.transactions.lock().remove(&transaction.id);
    }
}

impl TransactionManager for TransactionRegistry {
    fn start_transaction(&self, _context: &ClientContext) -> Arc<Transaction> {
        let transaction = Arc::new(Transaction {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            catalog_name: self.catalog_name.clone(),
            start_time: current_timestamp_ms(),
        });
        self.transactions
            .lock()
            .insert(transaction.id, Arc::clone(&transaction));
        debug!("Started transaction {} on '{}'", transaction.id, self.catalog_name);
        transaction
    }

    fn commit_transaction(&self, _context: &ClientContext, transaction: &Transaction) -> Result<()> {
        self.remove(transaction);
        Ok(())
    }

    fn rollback_transaction(&self, transaction: &Transaction) {
        self.remove(transaction);
    }

    fn checkpoint(&self, _context: &ClientContext, _force: bool) {}
}

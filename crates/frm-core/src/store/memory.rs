//! In-process contact store
//!
//! Holds records in memory behind a mutex. Used by tests and anywhere an
//! account needs to be simulated, including an unreachable one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{etag_for, CallContext, ContactStore, StoreError, StoreResult};
use crate::contact::card::FIELD_FORMATTED_NAME;
use crate::contact::{vcard, Card, ContactRecord};

#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    records: Mutex<BTreeMap<String, Card>>,
    unavailable: AtomicBool,
    /// Remaining successful writes before writes start failing
    write_budget: Mutex<Option<usize>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Seed a record with a display name and optional extra fields
    pub fn with_contact(self, path: &str, name: &str, fields: &[(&str, &str)]) -> Self {
        let mut card = Card::new();
        card.set(FIELD_FORMATTED_NAME, name);
        for (key, value) in fields {
            card.set(key, *value);
        }
        self.insert(path, card);
        self
    }

    pub fn insert(&self, path: &str, card: Card) {
        self.lock().insert(path.to_string(), card);
    }

    /// Make every subsequent call fail as if the account were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Allow `n` more writes, then fail the rest
    pub fn fail_writes_after(&self, n: usize) {
        *self
            .write_budget
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(n);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current card at a path
    pub fn card(&self, path: &str) -> Option<Card> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Card>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self, ctx: &CallContext, operation: &str) -> StoreResult<()> {
        ctx.check(operation)?;
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "{} is unreachable",
                self.name
            )));
        }
        Ok(())
    }

    fn take_write(&self) -> StoreResult<()> {
        let mut budget = self
            .write_budget
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match budget.as_mut() {
            Some(0) => Err(StoreError::Unavailable(format!(
                "{} rejected the write",
                self.name
            ))),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record(path: &str, card: &Card) -> ContactRecord {
        ContactRecord {
            path: path.to_string(),
            etag: Some(etag_for(vcard::serialize(card).as_bytes())),
            card: card.clone(),
        }
    }
}

impl ContactStore for MemoryStore {
    fn account_name(&self) -> &str {
        &self.name
    }

    fn list_contacts(&self, ctx: &CallContext) -> StoreResult<Vec<ContactRecord>> {
        self.check_available(ctx, "list contacts")?;
        Ok(self
            .lock()
            .iter()
            .map(|(path, card)| Self::record(path, card))
            .collect())
    }

    fn get_contact(&self, ctx: &CallContext, path: &str) -> StoreResult<ContactRecord> {
        self.check_available(ctx, "get contact")?;
        self.lock()
            .get(path)
            .map(|card| Self::record(path, card))
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    fn put_contact(&self, ctx: &CallContext, record: &ContactRecord) -> StoreResult<ContactRecord> {
        self.check_available(ctx, "put contact")?;
        self.take_write()?;
        let mut records = self.lock();
        if let (Some(expected), Some(current)) = (&record.etag, records.get(&record.path)) {
            if &Self::record(&record.path, current).etag.unwrap_or_default() != expected {
                return Err(StoreError::Conflict {
                    path: record.path.clone(),
                });
            }
        }
        records.insert(record.path.clone(), record.card.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Self::record(&record.path, &record.card))
    }

    fn create_contact(&self, ctx: &CallContext, card: Card) -> StoreResult<ContactRecord> {
        self.check_available(ctx, "create contact")?;
        self.take_write()?;
        let mut records = self.lock();
        let path = format!("{}.vcf", records.len() + 1);
        records.insert(path.clone(), card.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(Self::record(&path, &card))
    }
}

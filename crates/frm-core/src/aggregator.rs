//! Multi-account aggregation
//!
//! Treats every configured contact store as one logical address book.
//!
//! Name resolution tolerates unreachable accounts (the failure is logged and
//! the scan moves on), while [`Aggregator::pool_all`] fails as soon as any
//! account cannot be listed: listing commands must not report on a silently
//! partial pool.
//!
//! Multi-account writes are not transactional. When a write fails after
//! others succeeded, the applied ones stay and the caller receives
//! [`FrmError::PartialWriteFailure`] naming them.

use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::contact::{Card, ContactRecord};
use crate::error::{FrmError, Result};
use crate::store::{CallContext, ContactStore, StoreError, VdirStore};
use crate::trace_time;

/// A configured account: a named contact store
pub struct Account {
    store: Box<dyn ContactStore>,
}

impl Account {
    pub fn new(store: Box<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn name(&self) -> &str {
        self.store.account_name()
    }

    pub fn store(&self) -> &dyn ContactStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account").field("name", &self.name()).finish()
    }
}

/// An account together with the contacts just fetched from it
#[derive(Debug)]
pub struct AccountBinding<'a> {
    pub account: &'a Account,
    pub contacts: Vec<ContactRecord>,
}

/// A record and the account it was fetched from
#[derive(Debug, Clone)]
pub struct ContactMatch<'a> {
    pub account: &'a Account,
    pub record: ContactRecord,
}

impl ContactMatch<'_> {
    pub fn display_name(&self) -> &str {
        self.record.display_name()
    }
}

/// Every contact of every account
#[derive(Debug)]
pub struct ContactPool<'a> {
    bindings: Vec<AccountBinding<'a>>,
}

impl<'a> ContactPool<'a> {
    pub fn bindings(&self) -> &[AccountBinding<'a>] {
        &self.bindings
    }

    /// Iterate records with their accounts, in account order
    pub fn iter(&self) -> impl Iterator<Item = (&'a Account, &ContactRecord)> + '_ {
        self.bindings
            .iter()
            .flat_map(|b| b.contacts.iter().map(move |r| (b.account, r)))
    }

    /// Records that carry a display name
    pub fn named(&self) -> impl Iterator<Item = (&'a Account, &ContactRecord)> + '_ {
        self.iter().filter(|(_, r)| !r.display_name().is_empty())
    }

    pub fn len(&self) -> usize {
        self.bindings.iter().map(|b| b.contacts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The pooled view over all configured accounts
#[derive(Debug)]
pub struct Aggregator {
    accounts: Vec<Account>,
    ctx: CallContext,
}

impl Aggregator {
    pub fn new(accounts: Vec<Account>, ctx: CallContext) -> Self {
        Self { accounts, ctx }
    }

    /// Build one account per configured address book
    pub fn from_config(config: &Config) -> Result<Self> {
        let accounts: Vec<Account> = config
            .contact_services()
            .into_iter()
            .map(|svc| Account::new(Box::new(VdirStore::new(svc.account_name(), &svc.path))))
            .collect();
        if accounts.is_empty() {
            return Err(FrmError::UsageError(
                "no address book services configured".to_string(),
            ));
        }
        Ok(Self::new(
            accounts,
            CallContext::with_timeout(config.timeout()),
        ))
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn call_context(&self) -> &CallContext {
        &self.ctx
    }

    fn list(&self, account: &Account) -> Result<Vec<ContactRecord>> {
        account
            .store()
            .list_contacts(&self.ctx)
            .map_err(|e| wrap(account, "list contacts", e))
    }

    /// List every account, concurrently; results keep account order
    fn list_each(&self) -> Vec<(&Account, Result<Vec<ContactRecord>>)> {
        if self.accounts.len() == 1 {
            let account = &self.accounts[0];
            return vec![(account, self.list(account))];
        }
        thread::scope(|scope| {
            let handles: Vec<_> = self
                .accounts
                .iter()
                .map(|account| (account, scope.spawn(move || self.list(account))))
                .collect();
            handles
                .into_iter()
                .map(|(account, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(FrmError::account_unavailable(
                            account.name(),
                            "list contacts",
                            "worker panicked",
                        ))
                    });
                    (account, result)
                })
                .collect()
        })
    }

    /// First case-insensitive display-name match across accounts, in
    /// account order. Unreachable accounts are skipped.
    pub fn resolve_contact(&self, name: &str) -> Result<ContactMatch<'_>> {
        for account in &self.accounts {
            let contacts = match self.list(account) {
                Ok(contacts) => contacts,
                Err(e) => {
                    warn!(account = account.name(), error = %e, "skipping account during lookup");
                    continue;
                }
            };
            if let Some(record) = contacts.into_iter().find(|r| r.name_matches(name)) {
                debug!(account = account.name(), path = %record.path, "resolved contact");
                return Ok(ContactMatch { account, record });
            }
        }
        Err(FrmError::not_found(name))
    }

    /// Every display-name match in every reachable account
    pub fn resolve_all_matches(&self, name: &str) -> Result<Vec<ContactMatch<'_>>> {
        let mut matches = Vec::new();
        for (account, result) in self.list_each() {
            match result {
                Ok(contacts) => matches.extend(
                    contacts
                        .into_iter()
                        .filter(|r| r.name_matches(name))
                        .map(|record| ContactMatch { account, record }),
                ),
                Err(e) => {
                    warn!(account = account.name(), error = %e, "skipping account during lookup");
                }
            }
        }
        if matches.is_empty() {
            return Err(FrmError::not_found(name));
        }
        Ok(matches)
    }

    /// Fetch every account's full contact list. Any failure is fatal.
    pub fn pool_all(&self) -> Result<ContactPool<'_>> {
        let start = Instant::now();
        let mut bindings = Vec::with_capacity(self.accounts.len());
        for (account, result) in self.list_each() {
            let contacts = result?;
            debug!(account = account.name(), count = contacts.len(), "fetched account");
            bindings.push(AccountBinding { account, contacts });
        }
        trace_time!(start, "pool_all", accounts = bindings.len());
        Ok(ContactPool { bindings })
    }

    /// Write one record back to the account it came from
    pub fn update_contact(&self, account: &Account, record: &ContactRecord) -> Result<ContactRecord> {
        debug!(account = account.name(), path = %record.path, "updating contact");
        account
            .store()
            .put_contact(&self.ctx, record)
            .map_err(|e| wrap(account, "update contact", e))
    }

    /// Apply `mutate` to each match and write the changed ones back, in
    /// order. `mutate` returns whether it changed the card; unchanged
    /// matches are not written. Returns the number of records written.
    pub fn update_matches<F>(&self, matches: &mut [ContactMatch<'_>], mut mutate: F) -> Result<usize>
    where
        F: FnMut(&mut Card) -> bool,
    {
        let mut succeeded: Vec<String> = Vec::new();
        for m in matches.iter_mut() {
            if !mutate(&mut m.record.card) {
                continue;
            }
            match self.update_contact(m.account, &m.record) {
                Ok(written) => {
                    m.record = written;
                    succeeded.push(m.account.name().to_string());
                }
                Err(e) if succeeded.is_empty() => return Err(e),
                Err(e) => {
                    return Err(FrmError::PartialWriteFailure {
                        succeeded,
                        failed: m.account.name().to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        }
        Ok(succeeded.len())
    }

    /// Create a record in the first account
    pub fn create_contact(&self, card: Card) -> Result<ContactMatch<'_>> {
        let account = self
            .accounts
            .first()
            .ok_or_else(|| FrmError::UsageError("no address book services configured".into()))?;
        let record = account
            .store()
            .create_contact(&self.ctx, card)
            .map_err(|e| wrap(account, "create contact", e))?;
        info!(account = account.name(), path = %record.path, "created contact");
        Ok(ContactMatch { account, record })
    }
}

/// Attach operation and account identity to a store error
fn wrap(account: &Account, operation: &str, error: StoreError) -> FrmError {
    if error.is_unavailable() {
        FrmError::account_unavailable(account.name(), operation, error)
    } else {
        FrmError::remote(account.name(), operation, error)
    }
}

//! Context providers
//!
//! A provider contributes lines of background about a contact, such as
//! recent mail, for the `context` command. Providers are best effort: one
//! that fails to initialise or to answer is skipped with a warning.

pub mod jmap;

use std::time::Duration;

use tracing::warn;

use crate::config::Config;
use crate::contact::ContactRecord;
use crate::error::Result;

pub use jmap::JmapProvider;

pub trait ContextProvider {
    /// Heading shown above this provider's lines
    fn name(&self) -> &str;

    fn context_for(&self, record: &ContactRecord) -> Result<Vec<String>>;
}

/// Connect every configured provider, skipping those that fail
pub fn init_providers(config: &Config) -> Vec<Box<dyn ContextProvider>> {
    init_providers_with_timeout(config, config.timeout())
}

pub fn init_providers_with_timeout(
    config: &Config,
    timeout: Duration,
) -> Vec<Box<dyn ContextProvider>> {
    let mut providers: Vec<Box<dyn ContextProvider>> = Vec::new();
    for svc in config.jmap_services() {
        match JmapProvider::connect(svc, timeout) {
            Ok(provider) => providers.push(Box::new(provider)),
            Err(e) => warn!(endpoint = %svc.session_endpoint, error = %e, "skipping jmap provider"),
        }
    }
    providers
}

/// Query each provider in order; each non-empty answer becomes a block
/// headed by `"<name>:"`.
pub fn collect_context(providers: &[Box<dyn ContextProvider>], record: &ContactRecord) -> Vec<String> {
    let mut lines = Vec::new();
    for provider in providers {
        match provider.context_for(record) {
            Ok(block) if block.is_empty() => {}
            Ok(block) => {
                lines.push(format!("{}:", provider.name()));
                lines.extend(block);
            }
            Err(e) => warn!(provider = provider.name(), error = %e, "context provider failed"),
        }
    }
    lines
}

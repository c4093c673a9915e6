//! Recent mail via JMAP
//!
//! Connecting fetches the session resource to learn the API URL and the
//! primary mail account. Each lookup is then a single API request chaining
//! `Email/query` into `Email/get` with a result reference.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::ContextProvider;
use crate::config::JmapServiceConfig;
use crate::contact::card::FIELD_EMAIL;
use crate::contact::ContactRecord;
use crate::duration::DATE_FORMAT;
use crate::error::{FrmError, Result};

const CAPABILITY_CORE: &str = "urn:ietf:params:jmap:core";
const CAPABILITY_MAIL: &str = "urn:ietf:params:jmap:mail";
const PROVIDER_NAME: &str = "Recent emails";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    api_url: String,
    #[serde(default)]
    primary_accounts: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    method_responses: Vec<(String, Value, String)>,
}

#[derive(Debug, Deserialize)]
struct EmailGetResponse {
    #[serde(default)]
    list: Vec<EmailSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailSummary {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    received_at: Option<DateTime<Utc>>,
}

pub struct JmapProvider {
    agent: ureq::Agent,
    endpoint: String,
    api_url: String,
    token: String,
    account_id: String,
    max_results: usize,
}

impl JmapProvider {
    /// Authenticate against the session endpoint and locate the mail account
    pub fn connect(config: &JmapServiceConfig, timeout: Duration) -> Result<Self> {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        let endpoint = config.session_endpoint.clone();

        let body = agent
            .get(&endpoint)
            .header("Authorization", &bearer(&config.token))
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| FrmError::remote(&endpoint, "fetch jmap session", e))?;
        let session: Session = serde_json::from_str(&body)?;
        let account_id = session
            .primary_accounts
            .get(CAPABILITY_MAIL)
            .cloned()
            .ok_or_else(|| FrmError::remote(&endpoint, "fetch jmap session", "no mail account found"))?;

        debug!(endpoint = %endpoint, account = %account_id, "connected jmap provider");
        Ok(Self {
            agent,
            endpoint,
            api_url: session.api_url,
            token: config.token.clone(),
            account_id,
            max_results: config.max_results(),
        })
    }
}

impl ContextProvider for JmapProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn context_for(&self, record: &ContactRecord) -> Result<Vec<String>> {
        let addresses = email_addresses(record);
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let request = recent_mail_request(&self.account_id, &addresses, self.max_results);
        let payload = serde_json::to_string(&request)?;
        let body = self
            .agent
            .post(&self.api_url)
            .header("Authorization", &bearer(&self.token))
            .header("Content-Type", "application/json")
            .send(payload.as_str())
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| FrmError::remote(&self.endpoint, "query recent emails", e))?;

        render_messages(&body)
            .map_err(|reason| FrmError::remote(&self.endpoint, "query recent emails", reason))
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn email_addresses(record: &ContactRecord) -> Vec<&str> {
    record
        .card
        .values(FIELD_EMAIL)
        .into_iter()
        .filter(|a| !a.is_empty())
        .collect()
}

/// Mail from or to any of the addresses
fn email_filter(addresses: &[&str]) -> Value {
    let conditions: Vec<Value> = addresses
        .iter()
        .flat_map(|a| [json!({ "from": a }), json!({ "to": a })])
        .collect();
    json!({ "operator": "OR", "conditions": conditions })
}

fn recent_mail_request(account_id: &str, addresses: &[&str], limit: usize) -> Value {
    json!({
        "using": [CAPABILITY_CORE, CAPABILITY_MAIL],
        "methodCalls": [
            ["Email/query", {
                "accountId": account_id,
                "filter": email_filter(addresses),
                "sort": [{ "property": "receivedAt", "isAscending": false }],
                "limit": limit
            }, "0"],
            ["Email/get", {
                "accountId": account_id,
                "#ids": { "resultOf": "0", "name": "Email/query", "path": "/ids" },
                "properties": ["subject", "receivedAt"]
            }, "1"]
        ]
    })
}

/// One `"  subject (date)"` line per message in the `Email/get` response
fn render_messages(body: &str) -> std::result::Result<Vec<String>, String> {
    let response: ApiResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;

    let mut lines = Vec::new();
    for (method, args, _) in response.method_responses {
        match method.as_str() {
            "Email/get" => {
                let get: EmailGetResponse =
                    serde_json::from_value(args).map_err(|e| e.to_string())?;
                lines.extend(get.list.into_iter().map(|msg| {
                    let date = msg
                        .received_at
                        .map(|t| t.format(DATE_FORMAT).to_string())
                        .unwrap_or_default();
                    format!("  {} ({})", msg.subject.unwrap_or_default(), date)
                }));
            }
            "error" => {
                let kind = args.get("type").and_then(Value::as_str).unwrap_or("unknown");
                return Err(format!("server returned {kind}"));
            }
            _ => {}
        }
    }
    Ok(lines)
}

//! "Try it" panel: parameter collection, validation and live invocation
//!
//! A panel moves Collecting → (ValidationFailed → Collecting)* → Requesting →
//! Displaying. A closed panel is the idle state.
//!
//! The server holds a panel in Requesting only while [`execute`] awaits the
//! invoker, so rendered pages never carry it; the browser shows the loader and
//! disables the execute control itself while the form submission is in flight.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;

use super::widgets::ToastQueue;
use crate::catalog::EndpointRecord;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    ValidationFailed,
    Requesting,
    Displaying,
}

/// Result shown in the response panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub succeeded: bool,
    /// Pretty-printed JSON
    pub body: String,
}

/// A validated request, ready to be sent against an origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Endpoint path without any query suffix
    pub path: String,
    /// Declared parameters in declaration order, trimmed
    pub query: Vec<(String, String)>,
}

impl PreparedRequest {
    /// `<origin><path>?<query>`
    pub fn url(&self, origin: &str) -> Result<Url> {
        let base = format!("{}{}", origin.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&base).map_err(|e| Error::Url(format!("{base}: {e}")))?;
        url.query_pairs_mut().extend_pairs(self.query.iter());
        Ok(url)
    }
}

#[derive(Debug)]
pub enum Submission {
    /// At least one declared parameter was blank; nothing is sent
    Invalid,
    Ready(PreparedRequest),
}

/// Modal state for one endpoint
#[derive(Debug, Clone)]
pub struct TryItPanel<'a> {
    pub index: usize,
    pub record: &'a EndpointRecord,
    phase: Phase,
    values: Vec<(String, String)>,
    invalid: Vec<String>,
    outcome: Option<Outcome>,
}

impl<'a> TryItPanel<'a> {
    /// Open the modal with one empty input per declared parameter
    pub fn open(index: usize, record: &'a EndpointRecord) -> Self {
        Self {
            index,
            record,
            phase: Phase::Collecting,
            values: Vec::new(),
            invalid: Vec::new(),
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Last submitted raw value for a parameter
    pub fn value(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn is_invalid(&self, name: &str) -> bool {
        self.invalid.iter().any(|n| n == name)
    }

    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    /// Whether the execute control accepts clicks
    pub fn can_execute(&self) -> bool {
        self.phase != Phase::Requesting
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Requesting
    }

    /// Validate submitted form values against the declared parameters.
    /// Unknown form fields are ignored.
    pub fn submit(&mut self, form: &[(String, String)]) -> Submission {
        self.values.clear();
        self.invalid.clear();
        self.outcome = None;

        let mut query = Vec::with_capacity(self.record.item.params.len());
        for name in self.record.item.params.names() {
            let raw = form
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or_default();
            self.values.push((name.to_string(), raw.to_string()));

            let value = raw.trim();
            if value.is_empty() {
                self.invalid.push(name.to_string());
            } else {
                query.push((name.to_string(), value.to_string()));
            }
        }

        if !self.invalid.is_empty() {
            self.phase = Phase::ValidationFailed;
            return Submission::Invalid;
        }

        self.phase = Phase::Requesting;
        Submission::Ready(PreparedRequest {
            path: self.record.item.display_path().to_string(),
            query,
        })
    }

    /// Store the response (or failure) and leave the loading state
    pub fn complete(&mut self, result: Result<Value>) {
        let (succeeded, value) = match result {
            Ok(value) => (true, value),
            Err(e) => (false, failure_envelope(&e.to_string())),
        };
        let body = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        self.outcome = Some(Outcome { succeeded, body });
        self.phase = Phase::Displaying;
    }
}

/// Body shown when a try-it request fails
pub fn failure_envelope(message: &str) -> Value {
    json!({
        "error": "Request failed",
        "message": message,
    })
}

/// Sends a prepared request and decodes the JSON reply
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, url: Url) -> Result<Value>;
}

/// Invoker backed by reqwest. Non-2xx replies are still decoded and shown.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
}

impl HttpInvoker {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Invoker for HttpInvoker {
    async fn invoke(&self, url: Url) -> Result<Value> {
        tracing::debug!(%url, "Invoking endpoint");
        let response = self.client.get(url).send().await?;
        Ok(response.json::<Value>().await?)
    }
}

/// Run one execute click: validate, send, record the outcome and toasts
pub async fn execute(
    panel: &mut TryItPanel<'_>,
    form: &[(String, String)],
    origin: &str,
    invoker: &dyn Invoker,
    toasts: &mut ToastQueue,
) {
    let request = match panel.submit(form) {
        Submission::Invalid => {
            toasts.error("Please fill in all required parameters");
            return;
        }
        Submission::Ready(request) => request,
    };

    let result = match request.url(origin) {
        Ok(url) => invoker.invoke(url).await,
        Err(e) => Err(e),
    };

    match &result {
        Ok(_) => toasts.success("Request executed successfully"),
        Err(e) => {
            tracing::warn!(error = %e, endpoint = %panel.record.name(), "Try-it request failed");
            toasts.error(format!("Request failed: {}", e));
        }
    }
    panel.complete(result);
}

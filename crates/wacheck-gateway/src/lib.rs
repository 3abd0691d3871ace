//! WhatsApp gateway adapter.
//!
//! Implements the `wacheck-core` messaging and directory ports over the REST
//! surface of an Evolution-API-style bridge. The bridge wraps the real
//! multi-device protocol client; wire-level WhatsApp (pairing, encryption)
//! stays out of this repository.
//!
//! Routes, all under `{base}/{route}/{instance}` with an `apikey` header:
//! - `POST message/sendText`: `{"number", "text"}`
//! - `POST chat/sendPresence`: `{"presence": "available"}`
//! - `POST chat/whatsappNumbers`: `{"numbers": [...]}`, one entry per number
//! - `GET events?timeout=N`: long-poll for inbound messages, delivery order

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

pub mod runner;
mod wire;

use wacheck_core::{
    config::Config,
    domain::MatchRecord,
    errors::Error,
    messaging::{
        port::{DirectoryPort, MessagingPort},
        types::IncomingMessage,
    },
    Result,
};

/// The canonical user domain appended to bare numbers on send.
const USER_DOMAIN: &str = "s.whatsapp.net";

/// Slack added on top of the long-poll window before the HTTP request itself
/// is considered dead.
const POLL_GRACE: Duration = Duration::from_secs(5);

pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    instance: String,
    api_key: String,
    request_timeout: Duration,
    poll_timeout: Duration,
}

impl GatewayClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Gateway(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: cfg.gateway_url.trim_end_matches('/').to_string(),
            instance: cfg.instance.clone(),
            api_key: cfg.gateway_api_key.clone(),
            request_timeout: cfg.lookup_timeout,
            poll_timeout: cfg.poll_timeout,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}/{}", self.base_url, self.instance)
    }

    fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        match resp.status() {
            StatusCode::UNAUTHORIZED => Err(Error::LoggedOut),
            s if s.is_success() => Ok(resp),
            s => Err(Error::Gateway(format!("gateway returned {s}"))),
        }
    }

    async fn post_json<T: serde::Serialize>(&self, route: &str, payload: &T) -> Result<reqwest::Response> {
        let resp = self
            .http
            .post(self.url(route))
            .header("apikey", &self.api_key)
            .timeout(self.request_timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("{route} request failed: {e}")))?;
        Self::check_status(resp)
    }

    /// Long-poll the gateway for inbound messages, in delivery order.
    pub async fn fetch_events(&self) -> Result<Vec<IncomingMessage>> {
        let resp = self
            .http
            .get(self.url("events"))
            .header("apikey", &self.api_key)
            .query(&[("timeout", self.poll_timeout.as_secs())])
            .timeout(self.poll_timeout + POLL_GRACE)
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("event poll failed: {e}")))?;

        let resp = Self::check_status(resp)?;
        let events: Vec<wire::EventEnvelope> = resp
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("invalid event payload: {e}")))?;

        Ok(events
            .into_iter()
            .map(|ev| IncomingMessage {
                sender: ev.sender,
                body: ev.body,
            })
            .collect())
    }
}

/// Append the canonical user domain to bare numbers; full JIDs pass through.
fn canonical_jid(to: &str) -> String {
    if to.contains('@') {
        to.to_string()
    } else {
        format!("{to}@{USER_DOMAIN}")
    }
}

#[async_trait]
impl MessagingPort for GatewayClient {
    async fn send_text(&self, to: &str, text: &str) -> Result<()> {
        let number = canonical_jid(to);
        let payload = wire::SendTextRequest {
            number: &number,
            text,
        };
        self.post_json("message/sendText", &payload).await?;
        Ok(())
    }

    async fn send_presence(&self) -> Result<()> {
        let payload = wire::PresenceRequest {
            presence: "available",
        };
        self.post_json("chat/sendPresence", &payload).await?;
        Ok(())
    }
}

#[async_trait]
impl DirectoryPort for GatewayClient {
    async fn query(&self, identifier: &str) -> Result<Vec<MatchRecord>> {
        let payload = wire::NumberCheckRequest {
            numbers: vec![identifier],
        };
        let resp = self.post_json("chat/whatsappNumbers", &payload).await?;
        let entries: Vec<wire::NumberCheckEntry> = resp
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("invalid directory payload: {e}")))?;

        // Only existing numbers count as directory hits.
        Ok(entries
            .into_iter()
            .filter(|entry| entry.exists)
            .map(|entry| MatchRecord {
                jid: entry.jid,
                number: entry.number,
            })
            .collect())
    }
}

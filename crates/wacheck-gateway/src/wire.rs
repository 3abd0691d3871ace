//! Wire DTOs for the gateway REST surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct NumberCheckRequest<'a> {
    pub numbers: Vec<&'a str>,
}

/// The bridge reports every queried number; `exists` says whether the network
/// knows it.
#[derive(Debug, Deserialize)]
pub(crate) struct NumberCheckEntry {
    pub jid: String,
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendTextRequest<'a> {
    pub number: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PresenceRequest<'a> {
    pub presence: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventEnvelope {
    pub sender: String,
    #[serde(default)]
    pub body: Option<String>,
}

//! Inbound command dispatch: trigger recognition, the check pipeline, and the
//! reply sink.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    formatting::format_report,
    messaging::{port::MessagingPort, types::IncomingMessage},
    parse::parse_number_list,
    settings::SettingsStore,
    verify::BatchVerifier,
};

/// Intent recognized in an inbound message body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Trigger-prefixed batch check; the payload is the raw argument text.
    Check { argument_text: String },
}

/// Match a message body against the trigger token.
///
/// The match is a case-sensitive exact prefix; whitespace between the token
/// and the arguments is optional (`.check923…` works, as in the source).
pub fn recognize(trigger: &str, body: &str) -> Option<Intent> {
    let rest = body.trim().strip_prefix(trigger)?;
    Some(Intent::Check {
        argument_text: rest.trim().to_string(),
    })
}

/// Delivers a report to the original sender and, when one is configured, a
/// copy to the operator's notify target.
///
/// Both sends are best-effort: a failure is logged and contained, and a
/// notify failure never affects the primary delivery's outcome. No retries.
pub struct ReplySink {
    messenger: Arc<dyn MessagingPort>,
    settings: Arc<SettingsStore>,
}

impl ReplySink {
    pub fn new(messenger: Arc<dyn MessagingPort>, settings: Arc<SettingsStore>) -> Self {
        Self {
            messenger,
            settings,
        }
    }

    pub async fn deliver(&self, text: &str, primary: &str) {
        if let Err(e) = self.messenger.send_text(primary, text).await {
            warn!(to = %primary, "reply delivery failed: {e}");
        }

        if let Some(target) = self.settings.notify_target().await {
            if let Err(e) = self.messenger.send_text(&target, text).await {
                warn!(to = %target, "notify-target delivery failed: {e}");
            }
        }
    }
}

/// Per-message pipeline: recognize → parse → verify → format → deliver.
///
/// Stateless across messages and reconnects; the only shared state is the
/// notify-target handle inside the sink. Every recognized command produces
/// exactly one reply to the sender; anything else is ignored silently.
pub struct Dispatcher {
    cfg: Arc<Config>,
    verifier: BatchVerifier,
    messenger: Arc<dyn MessagingPort>,
    sink: ReplySink,
}

impl Dispatcher {
    pub fn new(
        cfg: Arc<Config>,
        verifier: BatchVerifier,
        messenger: Arc<dyn MessagingPort>,
        settings: Arc<SettingsStore>,
    ) -> Self {
        let sink = ReplySink::new(messenger.clone(), settings);
        Self {
            cfg,
            verifier,
            messenger,
            sink,
        }
    }

    /// Handle one inbound message. Failures are contained here; nothing
    /// observable escapes to the event loop.
    pub async fn handle(&self, message: &IncomingMessage) {
        let Some(body) = message.body.as_deref() else {
            return;
        };

        let Some(Intent::Check { argument_text }) = recognize(&self.cfg.trigger, body) else {
            debug!(sender = %message.sender, "ignoring non-command message");
            return;
        };

        let numbers = parse_number_list(&argument_text);
        if numbers.is_empty() {
            // Bare trigger, or commas and whitespace only.
            let rejection =
                format!("❌ Please provide a phone number after {}", self.cfg.trigger);
            if let Err(e) = self.messenger.send_text(&message.sender, &rejection).await {
                warn!(to = %message.sender, "rejection reply failed: {e}");
            }
            return;
        }

        info!(sender = %message.sender, count = numbers.len(), "running batch check");
        let result = self.verifier.verify_all(&numbers).await;
        self.sink
            .deliver(&format_report(&result), &message.sender)
            .await;
    }
}

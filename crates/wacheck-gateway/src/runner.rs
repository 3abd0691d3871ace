//! Session runner: keep-alive pings, inbound event drain, reconnect loop.
//!
//! The dispatcher itself is stateless across reconnects; everything
//! connection-shaped lives here.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, sleep};
use tracing::{debug, error, info, warn};

use wacheck_core::{
    config::Config, dispatch::Dispatcher, errors::Error, messaging::port::MessagingPort, Result,
};

use crate::GatewayClient;

/// Drain inbound messages forever, handing each to the dispatcher in delivery
/// order. Transport failures are retried with exponential backoff; only an
/// authentication loss is fatal and propagates to the caller.
pub async fn run_listener(
    cfg: Arc<Config>,
    client: Arc<GatewayClient>,
    dispatcher: Arc<Dispatcher>,
) -> Result<()> {
    spawn_keepalive(cfg.keepalive_interval, client.clone());

    info!(instance = %cfg.instance, "listening for messages");
    let mut backoff = cfg.reconnect_base_delay;
    loop {
        match client.fetch_events().await {
            Ok(events) => {
                backoff = cfg.reconnect_base_delay;
                for message in &events {
                    dispatcher.handle(message).await;
                }
            }
            Err(Error::LoggedOut) => {
                error!("gateway session is logged out");
                return Err(Error::LoggedOut);
            }
            Err(e) => {
                warn!(
                    "event poll failed, reconnecting in {}s: {e}",
                    backoff.as_secs()
                );
                sleep(backoff).await;
                backoff = (backoff * 2).min(cfg.reconnect_max_delay);
            }
        }
    }
}

/// Self-ping to keep the gateway session marked active (a presence update
/// every minute by default).
fn spawn_keepalive(every: Duration, client: Arc<GatewayClient>) {
    tokio::spawn(async move {
        let mut tick = interval(every);
        // The first tick fires immediately; skip it so the ping cadence starts
        // one full interval after connect.
        tick.tick().await;
        loop {
            tick.tick().await;
            match client.send_presence().await {
                Ok(()) => debug!("keep-alive presence sent"),
                Err(e) => warn!("keep-alive presence failed: {e}"),
            }
        }
    });
}

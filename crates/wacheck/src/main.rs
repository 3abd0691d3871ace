use std::sync::Arc;

use wacheck_core::{
    config::Config, dispatch::Dispatcher, errors::Error, settings::SettingsStore,
    verify::BatchVerifier,
};
use wacheck_gateway::{runner, GatewayClient};

mod menu;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wacheck_core::logging::init("wacheck")?;

    let cfg = Arc::new(Config::load()?);
    let settings = Arc::new(SettingsStore::load(&cfg.settings_file)?);
    let client = Arc::new(GatewayClient::new(&cfg)?);

    let interactive = std::env::args().nth(1).as_deref() == Some("menu");

    let outcome = if interactive {
        menu::run(cfg, client, settings).await
    } else {
        let verifier = BatchVerifier::new(
            client.clone(),
            cfg.directory_jid_suffix,
            cfg.max_concurrent_checks,
        );
        let dispatcher = Arc::new(Dispatcher::new(
            cfg.clone(),
            verifier,
            client.clone(),
            settings,
        ));
        runner::run_listener(cfg, client, dispatcher).await
    };

    if let Err(Error::LoggedOut) = &outcome {
        eprintln!("Logged out. Delete the gateway session and re-link before restarting.");
        std::process::exit(1);
    }
    outcome?;
    Ok(())
}

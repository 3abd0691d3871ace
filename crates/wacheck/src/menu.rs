//! Interactive terminal menu, the operator-facing mode.
//!
//! Same core pipeline as the listener; results are printed to the terminal
//! and forwarded to the personal number when one is configured.

use std::io::Write;
use std::sync::Arc;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use wacheck_core::{
    config::Config,
    formatting::{format_grouped_report, format_report},
    messaging::port::MessagingPort,
    parse::parse_number_list,
    settings::SettingsStore,
    verify::BatchVerifier,
    Result,
};
use wacheck_gateway::GatewayClient;

const BANNER: &str = r"-----------------------------------------
        WhatsApp Utility Menu
-----------------------------------------
1. Check WhatsApp Registration Status
2. Set or Change Personal WhatsApp Number
3. Exit
4. Check WhatsApp Registration (Comma-separated Numbers)
-----------------------------------------";

enum ReportStyle {
    /// One line per number plus the summary block.
    PerNumber,
    /// Registered / not-registered numbers as two comma-joined lists.
    Grouped,
}

pub async fn run(
    cfg: Arc<Config>,
    client: Arc<GatewayClient>,
    settings: Arc<SettingsStore>,
) -> Result<()> {
    let messenger: Arc<dyn MessagingPort> = client.clone();
    let verifier = BatchVerifier::new(client, cfg.directory_jid_suffix, cfg.max_concurrent_checks);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!(
        "wacheck interactive menu ({})",
        Local::now().format("%a %b %d %H:%M")
    );

    loop {
        println!("{BANNER}");
        prompt("Enter your choice: ")?;

        let Some(choice) = input.next_line().await? else {
            return Ok(()); // stdin closed
        };

        match choice.trim() {
            "1" => {
                check_numbers(
                    &verifier,
                    messenger.as_ref(),
                    &settings,
                    &mut input,
                    ReportStyle::PerNumber,
                )
                .await?
            }
            "2" => set_personal_number(&settings, &mut input).await?,
            "3" => {
                println!("Exiting...");
                return Ok(());
            }
            "4" => {
                check_numbers(
                    &verifier,
                    messenger.as_ref(),
                    &settings,
                    &mut input,
                    ReportStyle::Grouped,
                )
                .await?
            }
            _ => println!("Invalid choice, please select again."),
        }
    }
}

async fn check_numbers(
    verifier: &BatchVerifier,
    messenger: &dyn MessagingPort,
    settings: &SettingsStore,
    input: &mut Lines<BufReader<Stdin>>,
    style: ReportStyle,
) -> Result<()> {
    prompt("Enter phone numbers (comma-separated, with country code): ")?;
    let Some(line) = input.next_line().await? else {
        return Ok(());
    };

    let numbers = parse_number_list(&line);
    if numbers.is_empty() {
        println!("No phone numbers entered.");
        return Ok(());
    }

    println!("Checking registration status...");
    let result = verifier.verify_all(&numbers).await;
    let report = match style {
        ReportStyle::PerNumber => format_report(&result),
        ReportStyle::Grouped => format_grouped_report(&result),
    };
    println!("{report}");

    match settings.notify_target().await {
        Some(target) => match messenger.send_text(&target, &report).await {
            Ok(()) => println!("Summary sent to your personal WhatsApp number."),
            Err(e) => println!("Failed to send summary to personal number: {e}"),
        },
        None => println!("Personal WhatsApp number is not set."),
    }

    Ok(())
}

async fn set_personal_number(
    settings: &SettingsStore,
    input: &mut Lines<BufReader<Stdin>>,
) -> Result<()> {
    prompt("Enter your personal WhatsApp number (with country code): ")?;
    let Some(line) = input.next_line().await? else {
        return Ok(());
    };

    let number = line.trim();
    if number.is_empty() {
        println!("No number entered; keeping the current setting.");
        return Ok(());
    }

    settings.set_notify_target(number).await?;
    println!("Your personal WhatsApp number has been saved.");
    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(())
}

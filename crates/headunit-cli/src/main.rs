//! Head unit CLI - Phone control from the terminal
//!
//! Connect paired devices, place and answer calls, browse contacts and call
//! history through the head unit API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::Select;

use api::{CallRecordResponse, HeadUnitClient, StatusResponse};
use config::Config;

#[derive(Parser)]
#[command(name = "headunit")]
#[command(about = "Head unit CLI - Bluetooth phone control", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show connection and call status
    Status,

    /// List paired devices
    Devices,

    /// Connect to a paired device (most recent if omitted)
    Connect {
        /// Device ID
        device_id: Option<String>,
    },

    /// Disconnect the active device
    Disconnect,

    /// Place a call (prompts for a contact if no target given)
    Call {
        /// Phone number to dial
        #[arg(short, long, conflicts_with = "contact")]
        number: Option<String>,
        /// Contact ID to dial
        #[arg(short, long)]
        contact: Option<String>,
    },

    /// Answer the incoming call
    Answer,

    /// End the current call
    Hangup,

    /// List contacts
    Contacts,

    /// Show call history
    History {
        /// Max entries
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show or update configuration
    Config {
        /// Set the API base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let client = HeadUnitClient::new(&config.base_url);

    match cli.command {
        Commands::Status => cmd_status(&client).await,
        Commands::Devices => cmd_devices(&client).await,
        Commands::Connect { device_id } => {
            let status = client.connect(device_id).await?;
            println!("{} Connected", "✓".green());
            print_status(&status);
            Ok(())
        }
        Commands::Disconnect => {
            client.disconnect().await?;
            println!("{} Disconnected", "✓".green());
            Ok(())
        }
        Commands::Call { number, contact } => cmd_call(&client, number, contact).await,
        Commands::Answer => {
            let status = client.answer().await?;
            println!("{} Answered", "✓".green());
            print_status(&status);
            Ok(())
        }
        Commands::Hangup => {
            client.end_call().await?;
            println!("{} Call ended", "✓".green());
            Ok(())
        }
        Commands::Contacts => cmd_contacts(&client).await,
        Commands::History { limit } => cmd_history(&client, limit).await,
        Commands::Config { base_url } => cmd_config(config, base_url).await,
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_status(client: &HeadUnitClient) -> Result<()> {
    let status = client.status().await?;
    print_status(&status);
    Ok(())
}

async fn cmd_devices(client: &HeadUnitClient) -> Result<()> {
    let devices = client.devices().await?;

    if devices.is_empty() {
        println!("No paired devices.");
        return Ok(());
    }

    println!("{}", "Paired devices:".bold());
    for device in devices {
        let last = device
            .last_connected
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {} {} [{}] {} {} {}",
            device.id.dimmed(),
            device.display_name.cyan().bold(),
            device.kind,
            battery_badge(device.battery_percent),
            signal_badge(device.signal_bars),
            format!("last: {}", last).dimmed()
        );
    }

    Ok(())
}

async fn cmd_call(
    client: &HeadUnitClient,
    number: Option<String>,
    contact: Option<String>,
) -> Result<()> {
    let (number, contact) = match (number, contact) {
        (None, None) => (None, Some(pick_contact(client).await?)),
        target => target,
    };

    let status = client.make_call(number, contact).await?;
    match &status.current_call {
        Some(call) => println!("{} Calling {}...", "📞".green(), call.label().cyan()),
        None => println!("{} Call placed", "✓".green()),
    }

    Ok(())
}

async fn pick_contact(client: &HeadUnitClient) -> Result<String> {
    let contacts = client.contacts().await?;
    if contacts.is_empty() {
        bail!("No contacts available. Use --number to dial directly.");
    }

    let items: Vec<String> = contacts
        .iter()
        .map(|c| format!("{} ({})", c.name, c.phone_number))
        .collect();

    let selection = Select::new()
        .with_prompt("Call contact")
        .items(&items)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    Ok(contacts[selection].id.clone())
}

async fn cmd_contacts(client: &HeadUnitClient) -> Result<()> {
    let contacts = client.contacts().await?;

    if contacts.is_empty() {
        println!("No contacts.");
        return Ok(());
    }

    println!("{}", "Contacts:".bold());
    for contact in contacts {
        println!(
            "  {} {} {}",
            contact.id.dimmed(),
            contact.name.cyan(),
            contact.phone_number
        );
    }

    Ok(())
}

async fn cmd_history(client: &HeadUnitClient, limit: usize) -> Result<()> {
    let history = client.history().await?;

    if history.is_empty() {
        println!("No calls yet.");
        return Ok(());
    }

    println!("{}", "Recent calls:".bold());
    for record in history.iter().take(limit) {
        print_record(record);
    }

    Ok(())
}

async fn cmd_config(mut config: Config, base_url: Option<String>) -> Result<()> {
    if let Some(url) = base_url {
        config.set_base_url(&url);
        config.save()?;
        println!("{} Base URL set to {}", "✓".green(), config.base_url);

        print!("Testing connection... ");
        match HeadUnitClient::new(&config.base_url).health().await {
            Ok(true) => println!("{}", "OK".green()),
            _ => println!("{}", "Unreachable".yellow()),
        }
        return Ok(());
    }

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);

    Ok(())
}

// ============================================
// Output helpers
// ============================================

fn print_status(status: &StatusResponse) {
    if !status.connected {
        println!("{} {}", "Bluetooth:".bold(), "Not connected".red());
        return;
    }

    println!(
        "{} {} [{}]",
        "Bluetooth:".bold(),
        status.device_name.as_deref().unwrap_or("-").cyan(),
        status.device_kind.as_deref().unwrap_or("-")
    );
    println!(
        "  Battery {}  Signal {}",
        battery_badge(status.battery_percent),
        signal_badge(status.signal_bars)
    );

    match &status.current_call {
        Some(call) => {
            let elapsed = (Utc::now() - call.start_time).num_seconds().max(0);
            println!(
                "{} {} {} ({}, {})",
                "Call:".bold(),
                call.status.yellow(),
                call.label().cyan(),
                call.direction,
                format_duration(elapsed as u64)
            );
        }
        None => println!("{} {}", "Call:".bold(), status.call_status.dimmed()),
    }
}

fn print_record(record: &CallRecordResponse) {
    let outcome = match record.outcome.as_str() {
        "missed" => record.outcome.red(),
        "incoming" => record.outcome.green(),
        _ => record.outcome.blue(),
    };
    let when = record.start_time.with_timezone(&Local).format("%m-%d %H:%M");

    println!(
        "  {} {:>8} {} {}",
        when.to_string().dimmed(),
        outcome,
        record.name.as_deref().unwrap_or(&record.number).cyan(),
        format_duration(record.duration_seconds).dimmed()
    );
}

fn battery_badge(percent: Option<u8>) -> ColoredString {
    match percent {
        Some(p) if p >= 50 => format!("{}%", p).green(),
        Some(p) if p >= 20 => format!("{}%", p).yellow(),
        Some(p) => format!("{}%", p).red(),
        None => "-".dimmed(),
    }
}

fn signal_badge(bars: Option<u8>) -> String {
    match bars {
        Some(b) => format!("{}{}", "▮".repeat(b as usize), "▯".repeat(5 - b.min(5) as usize)),
        None => "-".to_string(),
    }
}

/// mm:ss, or h:mm:ss past an hour
fn format_duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(100), "1:40");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_signal_badge() {
        assert_eq!(signal_badge(Some(3)), "▮▮▮▯▯");
        assert_eq!(signal_badge(Some(0)), "▯▯▯▯▯");
        assert_eq!(signal_badge(None), "-");
    }

    #[test]
    fn test_cli_rejects_number_and_contact_together() {
        let parsed = Cli::try_parse_from(["headunit", "call", "-n", "+1555", "-c", "contact1"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_parses_history_limit() {
        let cli = Cli::try_parse_from(["headunit", "history", "--limit", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::History { limit: 3 }));
    }
}

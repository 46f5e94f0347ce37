//! License commands

use anyhow::Result;
use serde::Serialize;
use steeple_core::JsonFileStore;
use steeple_license::{AdminScreen, LicenseError, LicenseManager, LicenseSummary, Notice};

use super::{open_manager, Paths};
use crate::cli::{LicenseCommands, LicenseStatusArgs, NoticesArgs, SaveKeyArgs, SyncArgs};
use crate::output;

pub async fn run(command: LicenseCommands, paths: &Paths) -> Result<()> {
    let mut manager = open_manager(paths)?;

    match command {
        LicenseCommands::Status(args) => status(&manager, args).await,
        LicenseCommands::SaveKey(args) => save_key(&mut manager, args),
        LicenseCommands::Activate => activate(&mut manager).await,
        LicenseCommands::Deactivate => deactivate(&mut manager).await,
        LicenseCommands::Sync(args) => sync(&mut manager, args).await,
        LicenseCommands::Notices(args) => notices(&mut manager, args),
        LicenseCommands::Renew => renew(&manager),
    }
}

#[derive(Serialize)]
struct StatusReport {
    item_name: String,
    #[serde(flatten)]
    summary: LicenseSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_status: Option<String>,
}

async fn status(manager: &LicenseManager<JsonFileStore>, args: LicenseStatusArgs) -> Result<()> {
    let summary = manager.summary()?;

    let remote_status = if args.remote && summary.has_key {
        output::with_spinner(
            "Checking license with the store...",
            manager.remote_status(),
        )
        .await
    } else {
        None
    };

    if args.json {
        let report = StatusReport {
            item_name: manager.config().item_name.clone(),
            summary,
            remote_status,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header(&format!("{} license", manager.config().item_name));

    if let Some(message) = &summary.message {
        println!("{}\n", message);
    }

    if !summary.has_key {
        output::info("No license key saved. Run 'steeple license save-key <KEY>'");
        return Ok(());
    }

    output::kv("Status", &summary.status_label());
    if let Some(expiration) = &summary.expiration {
        output::kv("Expires", expiration);
    }
    if let Some(remote) = &remote_status {
        output::kv("Store reports", remote);
    }
    if !summary.buttons.is_empty() {
        let actions: Vec<String> = summary
            .buttons
            .iter()
            .map(|b| format!("{:?}", b).to_lowercase())
            .collect();
        output::kv("Actions", &actions.join(", "));
    }

    Ok(())
}

fn save_key(manager: &mut LicenseManager<JsonFileStore>, args: SaveKeyArgs) -> Result<()> {
    let reset = manager.save_key(&args.key)?;

    if args.key.trim().is_empty() {
        output::success("License key removed");
    } else if reset {
        output::success("License key changed; activate it to enable updates");
    } else {
        output::success("License key saved");
    }

    Ok(())
}

async fn activate(manager: &mut LicenseManager<JsonFileStore>) -> Result<()> {
    let result = output::with_spinner("Activating license...", manager.activate()).await;

    match result {
        Ok(_) => {
            output::success("License activated");
            Ok(())
        }
        Err(LicenseError::ActivationRejected { status }) => {
            if let Some(notice) = manager.activation_error_notice(&AdminScreen::LicensePage)? {
                output::error(&notice.message);
            }
            Err(LicenseError::ActivationRejected { status }.into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn deactivate(manager: &mut LicenseManager<JsonFileStore>) -> Result<()> {
    let state = output::with_spinner("Deactivating license...", manager.deactivate()).await?;

    if state.is_inactive() {
        output::success("License deactivated");
    } else {
        output::warning("The store did not confirm the deactivation");
    }

    Ok(())
}

async fn sync(manager: &mut LicenseManager<JsonFileStore>, args: SyncArgs) -> Result<()> {
    match args.screen {
        Some(screen) => {
            let screen: AdminScreen = screen.parse()?;
            if manager.auto_sync(&screen).await? {
                output::success(&format!("License synced for {}", screen));
            } else {
                output::info(&format!("License sync not due on {}", screen));
            }
        }
        None => match manager.sync().await? {
            Some(state) => output::success(&format!("License status: {}", state.status)),
            None => output::warning("License status unchanged; the store could not be reached"),
        },
    }

    Ok(())
}

fn notices(manager: &mut LicenseManager<JsonFileStore>, args: NoticesArgs) -> Result<()> {
    let screen: AdminScreen = args.screen.parse()?;

    let notices: Vec<Notice> = manager
        .activation_error_notice(&screen)?
        .into_iter()
        .chain(manager.notice(&screen)?)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&notices)?);
        return Ok(());
    }

    if notices.is_empty() {
        output::info(&format!("No license notices on {}", screen));
    }
    for notice in &notices {
        output::warning(&notice.message);
    }

    Ok(())
}

fn renew(manager: &LicenseManager<JsonFileStore>) -> Result<()> {
    let url = manager.renewal_url()?;
    if url.is_empty() {
        output::info("No renewal URL is configured for this theme");
    } else {
        println!("{}", url);
    }
    Ok(())
}

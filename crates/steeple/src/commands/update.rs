//! Update commands

use anyhow::Result;

use super::{open_manager, Paths};
use crate::cli::{UpdateCheckArgs, UpdateCommands};
use crate::output;

pub async fn run(command: UpdateCommands, paths: &Paths) -> Result<()> {
    match command {
        UpdateCommands::Check(args) => check(args, paths).await,
    }
}

async fn check(args: UpdateCheckArgs, paths: &Paths) -> Result<()> {
    let mut manager = open_manager(paths)?;

    if !manager.config().updates {
        output::info("Update checks are disabled for this theme");
        return Ok(());
    }

    let update =
        output::with_spinner("Checking for updates...", manager.check_for_update(args.force))
            .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    output::info(&format!("Installed version: {}", manager.config().version));
    match update {
        Some(update) => {
            output::success(&format!("Update available: {}", update.new_version));
            if let Some(url) = &update.url {
                output::kv("Details", url);
            }
            match &update.package {
                Some(package) => output::kv("Package", package),
                None => output::warning("Activate a valid license to download this update"),
            }
        }
        None => output::success("Already on the latest version"),
    }

    Ok(())
}

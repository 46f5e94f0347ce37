//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Run `task` behind a spinner, clearing it whether or not the task fails
pub async fn with_spinner<F: Future>(msg: &str, task: F) -> F::Output {
    clear_after(spinner(msg), task).await
}

async fn clear_after<F: Future>(pb: ProgressBar, task: F) -> F::Output {
    let output = task.await;
    pb.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spinner_cleared_on_error() {
        let pb = ProgressBar::hidden();
        let result: Result<(), &str> =
            clear_after(pb.clone(), async { Err("store unreachable") }).await;

        assert_eq!(result, Err("store unreachable"));
        assert!(pb.is_finished());
    }

    #[tokio::test]
    async fn test_spinner_cleared_on_success() {
        let pb = ProgressBar::hidden();
        assert_eq!(clear_after(pb.clone(), async { 7 }).await, 7);
        assert!(pb.is_finished());
    }
}

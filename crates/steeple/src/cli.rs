//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Steeple - theme licensing, updates, and sermon helpers
#[derive(Parser, Debug)]
#[command(name = "steeple")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to steeple.yaml config file
    #[arg(short, long, global = true, env = "STEEPLE_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Path to the settings file (defaults to ~/.steeple/settings.json)
    #[arg(long, global = true, env = "STEEPLE_SETTINGS")]
    pub settings: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// License key management
    #[command(subcommand)]
    License(LicenseCommands),

    /// Theme update checks
    #[command(subcommand)]
    Update(UpdateCommands),

    /// Sermon helpers
    #[command(subcommand)]
    Sermon(SermonCommands),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// License commands
#[derive(Subcommand, Debug)]
pub enum LicenseCommands {
    /// Show the cached license status
    Status(LicenseStatusArgs),

    /// Save a license key (an empty key removes it)
    SaveKey(SaveKeyArgs),

    /// Activate the saved key for this site
    Activate,

    /// Deactivate the saved key for this site
    Deactivate,

    /// Refresh the cached status from the store
    Sync(SyncArgs),

    /// Show the notices an admin screen would display
    Notices(NoticesArgs),

    /// Print the renewal URL for the saved key
    Renew,
}

#[derive(Args, Debug)]
pub struct LicenseStatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Ask the store for the current remote status as well
    #[arg(long)]
    pub remote: bool,
}

#[derive(Args, Debug)]
pub struct SaveKeyArgs {
    /// License key from the purchase receipt
    #[arg(default_value = "")]
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Admin screen being rendered; syncs only if the daily gate allows it
    #[arg(long)]
    pub screen: Option<String>,
}

#[derive(Args, Debug)]
pub struct NoticesArgs {
    /// Admin screen being rendered (dashboard, themes, update-core, license)
    #[arg(long, default_value = "dashboard")]
    pub screen: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Update commands
#[derive(Subcommand, Debug)]
pub enum UpdateCommands {
    /// Check the store for a newer theme release
    Check(UpdateCheckArgs),
}

#[derive(Args, Debug)]
pub struct UpdateCheckArgs {
    /// Ignore the cached answer
    #[arg(short, long)]
    pub force: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Sermon commands
#[derive(Subcommand, Debug)]
pub enum SermonCommands {
    /// List the books of the Bible in canonical order
    Books(BooksArgs),

    /// Resolve sermon media details
    Media(MediaArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TestamentArg {
    Old,
    New,
}

#[derive(Args, Debug)]
pub struct BooksArgs {
    /// Only list one testament
    #[arg(long, value_enum)]
    pub testament: Option<TestamentArg>,

    /// Group these book names by testament instead of listing the canon
    #[arg(long, value_delimiter = ',')]
    pub group: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MediaArgs {
    /// Video URL or embed
    #[arg(long, default_value = "")]
    pub video: String,

    /// Audio URL or embed
    #[arg(long, default_value = "")]
    pub audio: String,

    /// PDF URL
    #[arg(long, default_value = "")]
    pub pdf: String,

    /// Sermon has full text
    #[arg(long)]
    pub full_text: bool,

    /// Uploads directory on disk
    #[arg(long, default_value = ".")]
    pub uploads_dir: Utf8PathBuf,

    /// Public URL of the uploads directory
    #[arg(long, default_value = "")]
    pub uploads_url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

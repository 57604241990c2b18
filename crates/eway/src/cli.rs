//! Clap derive structures for the `eway` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// eway -- season passes for eWay Bus highway routes
#[derive(Debug, Parser)]
#[command(
    name = "eway",
    version,
    about = "Buy, verify and manage eWay Bus season passes",
    long_about = "Command-line client for the eWay Bus season-pass service.\n\n\
        Quote fares, walk through the purchase wizard, print the QR pass\n\
        or export it as a PDF, and verify passes offline.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "EWAY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "EWAY_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Account email (overrides profile)
    #[arg(long, env = "EWAY_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password (prefer the keyring or EWAY_PASSWORD)
    #[arg(long, global = true, hide = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EWAY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "EWAY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain choices ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StationArg {
    Colombo,
    Galle,
    Kandy,
    Kalutara,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Adult,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DurationArg {
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    /// eZCash mobile wallet
    #[value(alias = "e-wallet", alias = "ewallet")]
    Ezcash,
    /// Debit or credit card
    Card,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register(RegisterArgs),

    /// Sign in and report the account role
    Login,

    /// Sign out
    Logout,

    /// Show the signed-in user's profile
    #[command(alias = "me")]
    Profile,

    /// Browse the highway route catalogue and fare table
    #[command(alias = "r")]
    Routes(RoutesArgs),

    /// Price a pass without buying it
    Quote(QuoteArgs),

    /// Buy a season pass (interactive wizard)
    Buy(BuyArgs),

    /// Check a pass payload and its current status
    Verify(VerifyArgs),

    /// Regenerate the PDF for a saved pass payload
    Export(ExportArgs),

    /// Administrator views
    Admin(AdminArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Accounts ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Username (prompted when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

// ── Routes ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List highway routes
    #[command(alias = "ls")]
    List {
        /// Filter by name, highway or route number
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show the weekly base fare between stations
    Fares,
}

// ── Quote ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Boarding station
    #[arg(long)]
    pub from: StationArg,

    /// Destination station
    #[arg(long)]
    pub to: StationArg,

    /// Pass duration
    #[arg(long, short = 'd', default_value = "week")]
    pub duration: DurationArg,

    /// Rider category
    #[arg(long, short = 'c', default_value = "adult")]
    pub category: CategoryArg,

    /// First travel day (YYYY-MM-DD); prints the validity window
    #[arg(long)]
    pub start: Option<String>,
}

// ── Buy ──────────────────────────────────────────────────────────────

/// Every field may be given up front; anything missing is prompted for.
#[derive(Debug, Args)]
pub struct BuyArgs {
    /// Passenger full name
    #[arg(long)]
    pub name: Option<String>,

    /// Rider category
    #[arg(long, short = 'c')]
    pub category: Option<CategoryArg>,

    /// ID photo (required for adults)
    #[arg(long, value_name = "FILE")]
    pub id_photo: Option<PathBuf>,

    /// Student document (required for students)
    #[arg(long, value_name = "FILE")]
    pub student_doc: Option<PathBuf>,

    /// Boarding station
    #[arg(long)]
    pub from: Option<StationArg>,

    /// Destination station
    #[arg(long)]
    pub to: Option<StationArg>,

    /// Pass duration
    #[arg(long, short = 'd')]
    pub duration: Option<DurationArg>,

    /// First travel day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Payment method
    #[arg(long)]
    pub payment: Option<PaymentArg>,

    /// Write the pass PDF into this directory
    #[arg(long, value_name = "DIR")]
    pub pdf_dir: Option<PathBuf>,

    /// Write the QR payload JSON to this file
    #[arg(long, value_name = "FILE")]
    pub payload_out: Option<PathBuf>,

    /// Issue the pass without saving it to the backend
    #[arg(long)]
    pub offline: bool,

    /// Never prompt; fail on missing fields instead
    #[arg(long)]
    pub no_input: bool,
}

// ── Verify / Export ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Payload JSON file, or `-` for stdin
    #[arg(value_name = "PAYLOAD")]
    pub input: String,

    /// Check as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub on: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Payload JSON file, or `-` for stdin
    #[arg(value_name = "PAYLOAD")]
    pub input: String,

    /// Output directory
    #[arg(long, short = 'O', default_value = ".")]
    pub out: PathBuf,

    /// Also print the QR code to the terminal
    #[arg(long)]
    pub qr: bool,
}

// ── Admin ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Dashboard counters
    Stats,

    /// All issued tickets
    Tickets {
        /// Filter by holder name, username or email
        #[arg(long, short = 's')]
        search: Option<String>,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (passwords masked)
    Show,

    /// Print the configuration file path
    Path,

    /// Set a profile value
    Set {
        /// Key: backend, email, password_env, user_ref, timeout
        key: String,
        /// Value to set
        value: String,
    },

    /// List profiles
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile (defaults to the active one)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

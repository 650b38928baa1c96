//! Clap derive structures for the `portglass` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

use portglass_core::LayoutMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// portglass -- front-panel visibility for managed switches
#[derive(Debug, Parser)]
#[command(
    name = "portglass",
    version,
    about = "Watch switch front panels and traffic from the terminal",
    long_about = "Polls a portglass backend for live switch telemetry and renders\n\
        front-panel layouts, per-port detail, and rolling traffic history.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PORTGLASS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "PORTGLASS_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Session username (overrides profile)
    #[arg(long, short = 'u', env = "PORTGLASS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PORTGLASS_INSECURE", global = true)]
    pub insecure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

/// Clap-facing mirror of [`LayoutMode`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Odd indices on top, even on the bottom
    OddTop,
    /// Left-to-right fill
    Sequential,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::OddTop => LayoutMode::OddTop,
            LayoutArg::Sequential => LayoutMode::Sequential,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage switch devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Show one telemetry snapshot: panel, usage, optional port detail
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Poll a device continuously and print applied snapshots
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Edit a device's port sections
    #[command(alias = "sec")]
    Sections(SectionsArgs),

    /// Change the session password
    Passwd,
}

// ── devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List managed devices
    #[command(alias = "ls")]
    List,

    /// Register a new device (probes it over SNMP; Ctrl-C cancels)
    Add {
        /// Device IP address
        ip_address: String,

        /// Display name (auto-detected from sysName when omitted)
        #[arg(long)]
        name: Option<String>,

        /// SNMP community string
        #[arg(long, default_value = "public")]
        community: String,

        /// Permit physical port index 0
        #[arg(long)]
        allow_port_zero: bool,
    },

    /// Remove a device
    Rm {
        /// Device id
        id: i64,
    },

    /// Re-derive the detected topology from the live device
    Sync {
        /// Device id
        id: i64,
    },
}

// ── status / watch ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Device id
    #[arg(long, short = 'd')]
    pub device: i64,

    /// Show detail for one interface (breakout sub-ports included)
    #[arg(long)]
    pub port: Option<String>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Device id
    #[arg(long, short = 'd')]
    pub device: i64,

    /// Keep polling even while the view is hidden
    #[arg(long)]
    pub always_poll: bool,

    /// Track one interface and print its rate each cycle
    #[arg(long)]
    pub port: Option<String>,
}

// ── sections ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SectionsArgs {
    /// Device id
    #[arg(long, short = 'd')]
    pub device: i64,

    #[command(subcommand)]
    pub command: SectionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SectionsCommand {
    /// List configured sections
    #[command(alias = "ls")]
    List,

    /// Append a section covering the next free port block
    Add,

    /// Append a combo companion for the last section
    AddCombo,

    /// Delete a section
    Rm {
        /// Section id
        id: String,
    },

    /// Edit fields of a section
    Set {
        /// Section id
        id: String,

        /// Section title
        #[arg(long)]
        title: Option<String>,

        /// Connector type (RJ45, SFP, SFP+, SFP28, QSFP, QSFP28, ...)
        #[arg(long = "type")]
        port_type: Option<String>,

        /// Row layout mode
        #[arg(long)]
        layout: Option<LayoutArg>,

        /// Number of rows
        #[arg(long)]
        rows: Option<u32>,

        /// Port range expression, e.g. "1-24, 49, 51-52"
        #[arg(long)]
        ranges: Option<String>,
    },
}

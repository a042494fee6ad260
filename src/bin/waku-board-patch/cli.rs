use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "waku-board-patch")]
#[command(about = "Board manifest patcher for the WaKu Controller (ESP32-S3)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Patch a board manifest: append the C++ flags and set build.hwids.
    Apply(ApplyArgs),

    /// Report what a manifest currently says about the USB IDs.
    Show(ShowArgs),

    /// List detected USB serial ports.
    List(ListArgs),

    /// Verify a device carrying the patched USB IDs is attached.
    Check(CheckArgs),
}

#[derive(Parser, Clone)]
pub struct HwidArgs {
    /// Vendor ID to install instead of 0x303A. Written verbatim.
    #[arg(long)]
    pub vid: Option<String>,

    /// Product ID to install instead of 0x82E5. Written verbatim.
    #[arg(long)]
    pub pid: Option<String>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the board manifest JSON.
    pub manifest: PathBuf,

    /// Write the patched manifest here instead of in place.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Start from an empty manifest when the file does not exist.
    #[arg(long)]
    pub create: bool,

    /// Extra C++ flag appended after the defaults (repeatable).
    #[arg(long = "flag")]
    pub flags: Vec<String>,

    #[command(flatten)]
    pub hwid: HwidArgs,

    /// Load and patch without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit JSON line events to stdout.
    #[arg(long)]
    pub json: bool,

    /// Reduce output (only errors).
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// More logs to stderr.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Path to the board manifest JSON.
    pub manifest: PathBuf,

    /// Emit JSON output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Emit JSON line output.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub hwid: HwidArgs,

    /// Keep scanning until a matching device appears.
    #[arg(long)]
    pub wait: bool,

    /// Max time to wait for the device (0 = forever).
    #[arg(long, default_value_t = 0)]
    pub wait_timeout_ms: u64,

    /// Emit JSON line events to stdout.
    #[arg(long)]
    pub json: bool,

    /// More logs to stderr.
    #[arg(long, short)]
    pub verbose: bool,
}

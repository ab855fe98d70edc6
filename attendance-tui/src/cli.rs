use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::View;

#[derive(Debug, Parser)]
#[command(name = "attendance-tui")]
#[command(about = "Terminal dashboard for the QR attendance service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the dashboard
    Run(RunArgs),
    /// Download the company attendance workbook without opening the dashboard
    Export(ExportArgs),
    /// Print config path and create default file if missing
    ConfigPath,
}

#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Link encoded in a scanned QR code (its `token` query parameter is used)
    #[arg(long)]
    pub link: Option<String>,
    /// QR scan token, when it is known without the full link
    #[arg(long, conflicts_with = "link")]
    pub token: Option<String>,
    /// View to open first
    #[arg(long, value_enum, default_value_t = StartView::Hr)]
    pub view: StartView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StartView {
    #[default]
    Hr,
    Employee,
    Qr,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Hr => View::Hr,
            StartView::Employee => View::Employee,
            StartView::Qr => View::QrDisplay,
        }
    }
}

impl RunArgs {
    /// The QR scan identity for the employee view, if one was provided.
    pub fn scan_token(&self) -> Option<String> {
        if let Some(token) = self.token.as_deref().map(str::trim) {
            return (!token.is_empty()).then(|| token.to_string());
        }
        self.link.as_deref().and_then(scan_token_from_link)
    }
}

pub fn scan_token_from_link(link: &str) -> Option<String> {
    let url = url::Url::parse(link.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// HR account name
    #[arg(long)]
    pub name: String,
    /// HR password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
    /// First day of the range, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day of the range, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub end: Option<String>,
    /// Output directory (defaults to `export_dir` from the config)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

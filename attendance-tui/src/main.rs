mod app;
mod cli;
mod config;
mod export;
mod logging;
mod poller;
mod runtime;
mod session;
#[cfg(test)]
mod test_support;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use app::App;
use attendance_api::domain::{parse_date, DateRange};
use attendance_api::AttendanceClient;
use clap::Parser;
use cli::{Cli, Commands, ExportArgs, RunArgs};
use config::AttendanceConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use runtime::Runtime;
use std::io;

fn main() -> Result<()> {
    // Before the runtime starts its worker threads.
    time_utils::init_local_offset();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(run())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AttendanceConfig::load()?;
    logging::init(&AttendanceConfig::log_path()?)?;

    match cli.command {
        Some(Commands::ConfigPath) => print_config_path(),
        Some(Commands::Export(args)) => run_export(args, &config).await,
        Some(Commands::Run(args)) => run_dashboard(args, &config).await,
        None => run_dashboard(RunArgs::default(), &config).await,
    }
}

fn print_config_path() -> Result<()> {
    let path = AttendanceConfig::config_path()?;
    if !path.exists() {
        AttendanceConfig::default().save()?;
    }
    println!("{}", path.display());
    Ok(())
}

fn client_for(config: &AttendanceConfig) -> Result<AttendanceClient> {
    AttendanceClient::new(&config.api_url, config.request_timeout())
        .with_context(|| format!("Invalid api_url '{}'", config.api_url))
}

async fn run_dashboard(args: RunArgs, config: &AttendanceConfig) -> Result<()> {
    let client = client_for(config)?;
    let scan_token = args.scan_token();
    tracing::info!(
        api_url = %config.api_url,
        has_scan_token = scan_token.is_some(),
        "starting dashboard"
    );

    let mut app = App::new(
        args.view.into(),
        scan_token,
        config.export_dir.clone(),
        config.qr_refresh_interval().as_secs(),
    );
    let mut rt = Runtime::new(client, config.qr_refresh_interval());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &mut rt).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %format!("{:#}", err), "dashboard exited with error");
    }
    res
}

fn read_range(args: &ExportArgs) -> Result<DateRange> {
    let today = time_utils::local_today();
    let day = |value: &Option<String>| -> Result<time::Date> {
        match value {
            Some(s) => Ok(parse_date(s)?),
            None => Ok(today),
        }
    };
    Ok(DateRange::new(day(&args.start)?, day(&args.end)?))
}

async fn run_export(args: ExportArgs, config: &AttendanceConfig) -> Result<()> {
    let range = read_range(&args)?;
    let password = match &args.password {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("HR password: ").context("Failed to read password")?,
    };

    let client = client_for(config)?;
    let token = client
        .login_hr(&args.name, &password)
        .await
        .context("Invalid credentials or login failed.")?;

    let dir = args.out.as_deref().unwrap_or(&config.export_dir);
    let path = export::download_report(&client, &token, range, dir).await?;
    println!("Attendance saved to {}", path.display());
    Ok(())
}

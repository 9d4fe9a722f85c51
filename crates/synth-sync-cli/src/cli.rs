//! Command-line surface and the interactive run
//!
//! With no flags: start adb if needed, prompt for a device, list what is
//! missing and push it. Flags override values from the config file.

use std::path::PathBuf;

use clap::Parser;
use synth_sync_core::config::Config;
use synth_sync_core::{
    AdbBridge, DeviceBridge, DeviceSession, DuplicatePolicy, HttpBeatmapFetcher,
    HttpCatalogClient, SyncEngine, SyncOptions, SyncPhase, SyncPlan, SyncProgress, SyncReport,
};

use crate::prompt;

#[derive(Parser, Debug)]
#[command(
    name = "synth-sync",
    version,
    about = "Download Synth Riders custom songs missing from a headset and push them over adb"
)]
pub struct Cli {
    /// Serial of the device to sync (skips the interactive prompt)
    #[arg(short = 'd', long)]
    pub device: Option<String>,

    /// Custom songs folder on the device
    #[arg(long)]
    pub folder: Option<String>,

    /// Beatmap catalog endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Host that download URLs are relative to
    #[arg(long)]
    pub download_host: Option<String>,

    /// Maximum catalog pages fetched at once
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout for catalog pages, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report each missing file name once even if the catalog lists it repeatedly
    #[arg(long)]
    pub dedupe: bool,

    /// Only list missing beatmaps; download and push nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the adb executable
    #[arg(long)]
    pub adb: Option<PathBuf>,

    /// Directory downloads are staged in before pushing
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref folder) = self.folder {
            config.device_folder = folder.clone();
        }
        if let Some(ref endpoint) = self.endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(ref host) = self.download_host {
            config.download_host = host.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_requests = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if self.dedupe {
            config.duplicate_policy = DuplicatePolicy::FirstOccurrence;
        }
        if let Some(ref adb) = self.adb {
            config.adb_path = adb.clone();
        }
        if let Some(ref dir) = self.staging_dir {
            config.staging_dir = Some(dir.clone());
        }
    }
}

/// Run one sync pass
pub async fn run(args: Cli) -> anyhow::Result<()> {
    let mut config = Config::load();
    args.apply(&mut config);
    config.validate()?;

    let bridge = AdbBridge::new(&config.adb_path).with_server_addr(config.adb_server_addr.clone());
    match bridge.ensure_server().await {
        Ok(false) => println!("ADB server is already running."),
        Ok(true) => println!("ADB server started."),
        // Listing devices below reports the real problem
        Err(e) => tracing::warn!("Failed to start ADB server: {}", e),
    }

    let devices = bridge.list_devices().await?;
    let device = match args.device {
        Some(ref serial) => prompt::find_device(&devices, serial)?,
        None => {
            let stdin = std::io::stdin();
            prompt::select_device(&devices, stdin.lock(), std::io::stdout())?
        }
    }
    .clone();
    println!("You selected device with Serial: {}", device.serial);

    let engine = SyncEngine::new(
        HttpCatalogClient::from_config(&config)?,
        HttpBeatmapFetcher::from_config(&config)?,
        SyncOptions::from_config(&config).dry_run(args.dry_run),
    )
    .with_progress_callback(Box::new(print_progress));

    let mut session = DeviceSession::new(bridge, device);
    let plan = engine.plan(&session).await?;
    print_plan(&plan);

    if engine.options().dry_run || plan.missing.is_empty() {
        return Ok(());
    }

    tokio::fs::create_dir_all(&config.staging_dir()).await?;
    let report = engine.execute(&plan.missing, &mut session).await;
    print_sync_report(&report);

    Ok(())
}

fn print_progress(progress: SyncProgress) {
    match progress.phase {
        SyncPhase::Downloading | SyncPhase::Transferring => println!(
            "[{}/{}] {}: {}",
            progress.current, progress.total, progress.phase, progress.current_name
        ),
        SyncPhase::Complete => {}
    }
}

fn print_plan(plan: &SyncPlan) {
    println!("Files on device: {}", plan.device_file_count);
    println!(
        "Fetched {} catalog pages ({} beatmaps) in {:.2?}",
        plan.pages.len(),
        plan.catalog_entry_count(),
        plan.fetch_elapsed
    );

    if plan.missing.is_empty() {
        println!();
        println!("All beatmaps are present on the device.");
        return;
    }

    println!();
    println!("Missing {} beatmaps on device:", plan.missing.len());
    for entry in &plan.missing {
        println!("  {} ({})", entry.name, entry.download_locator);
    }
    println!();
}

fn print_sync_report(report: &SyncReport) {
    println!();
    println!("Sync Complete:");
    println!("  Pushed:   {}", report.pushed);
    println!("  Failed:   {}", report.failed);
    println!("  Elapsed:  {:.2?}", report.elapsed);
    if report.cleanup_warnings > 0 {
        println!("  Temp files left behind: {}", report.cleanup_warnings);
    }

    if !report.failures.is_empty() {
        println!();
        println!("Errors:");
        for failure in &report.failures {
            println!("  - {}", failure.error);
        }
    }
}

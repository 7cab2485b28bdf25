//! clipsync - align a video to a separately recorded audio track.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use clipsync_core::analysis::FfmpegLoader;
use clipsync_core::config::{ConfigManager, Settings};
use clipsync_core::logging::{init_tracing, LogLevel};
use clipsync_core::media::FfmpegTool;
use clipsync_core::orchestrator::{RunOutcome, SyncPipeline, SyncRequest};

#[derive(Parser)]
#[command(name = "clipsync")]
#[command(about = "Trim or pad a video so it lines up with an external audio track", long_about = None)]
#[command(version)]
struct Cli {
    /// Video file whose own audio is the sync reference
    #[arg(required_unless_present = "init_config")]
    video: Option<PathBuf>,

    /// Separately recorded audio file
    #[arg(required_unless_present = "init_config")]
    audio: Option<PathBuf>,

    /// Only estimate and print the offset; write nothing
    #[arg(long)]
    check: bool,

    /// Settings file (missing file means defaults)
    #[arg(long, default_value = ".config/clipsync.toml")]
    config: PathBuf,

    /// Write the default settings to the --config path and exit
    #[arg(long)]
    init_config: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = if cli.init_config {
        handle_init_config(&cli)
    } else {
        handle_sync(&cli)
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn handle_init_config(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConfigManager::new(&cli.config);
    manager.save()?;
    eprintln!("Wrote default settings to {}", manager.path().display());
    Ok(())
}

fn handle_sync(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(video), Some(audio)) = (&cli.video, &cli.audio) else {
        return Err("both VIDEO and AUDIO are required".into());
    };

    let settings = load_settings(cli)?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        settings.logging.level
    };
    init_tracing(level);

    let loader = FfmpegLoader::new(&settings.tools.ffmpeg).with_soxr(settings.analysis.use_soxr);
    let tool = FfmpegTool::new(&settings.tools.ffmpeg, &settings.tools.ffprobe)
        .with_command_callback(Box::new(|line: &str| println!("{}", line)));

    let pipeline = SyncPipeline::new(&settings, loader, tool)
        .with_reporter(Box::new(|line: &str| println!("{}", line)));

    let request = SyncRequest::new(video, audio).check_only(cli.check);
    match pipeline.run(&request)? {
        RunOutcome::Checked(_) => tracing::debug!("Check complete"),
        RunOutcome::Written(path) => tracing::info!("Done: {}", path.display()),
    }

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut manager = ConfigManager::new(&cli.config);
    manager.load_or_default()?;
    Ok(manager.into_settings())
}

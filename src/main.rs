use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use mc_artifacts::core::tasks::{ArtifactOutcome, TaskReport};
use mc_artifacts::{commands, init_tracing, CacheResult, CacheSettings};

/// Fetch and verify Minecraft game artifacts into a build cache
#[derive(Parser)]
#[command(name = "mc-artifacts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/mc-artifacts/settings.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Game version id, e.g. 1.20.4
    #[arg(long = "game-version", global = true)]
    game_version: Option<String>,

    /// Version manifest endpoint
    #[arg(long, global = true)]
    manifest: Option<String>,

    /// Cache root directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Local game installation to reuse files from
    #[arg(long, global = true)]
    minecraft_dir: Option<PathBuf>,

    /// Also handle the server jar and server mappings
    #[arg(long, global = true)]
    server: bool,

    /// Exit non-zero when any artifact could not be placed
    #[arg(long, global = true)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Client jar (and server jar with --server)
    DownloadGame,
    /// Obfuscation mapping files
    DownloadMappings,
    /// Asset index and asset objects
    DownloadAssets,
    /// Native jars, extracted for the running OS
    DownloadNatives,
    /// Every download task in order
    All,
    /// Print library coordinates, one per line
    Libraries,
    /// Print native jar URLs for the running OS, one per line
    Natives,
    /// Print the effective settings as JSON
    ShowConfig,
}

impl Cli {
    fn settings(&self) -> CacheResult<CacheSettings> {
        let mut settings = CacheSettings::load(self.config.as_deref())?;
        if let Some(version) = &self.game_version {
            settings.version = version.clone();
        }
        if let Some(manifest) = &self.manifest {
            settings.manifest_url = manifest.clone();
        }
        if let Some(cache_dir) = &self.cache_dir {
            settings.cache_dir = cache_dir.clone();
        }
        if let Some(minecraft_dir) = &self.minecraft_dir {
            settings.minecraft_dir = Some(minecraft_dir.clone());
        }
        if self.server {
            settings.download_server = true;
        }
        Ok(settings)
    }
}

/// Whether every report is free of artifact failures.
fn print_reports(reports: &[TaskReport]) -> bool {
    let mut clean = true;
    for report in reports {
        println!("{}", report.summary());
        for failure in report.failures() {
            clean = false;
            if let ArtifactOutcome::Failed(reason) = &failure.outcome {
                println!("  failed {}: {}", failure.label, reason);
            }
        }
    }
    clean
}

async fn run(cli: &Cli) -> CacheResult<bool> {
    let settings = cli.settings()?;

    let clean = match cli.command {
        Commands::DownloadGame => print_reports(&[commands::download_game(&settings).await?]),
        Commands::DownloadMappings => {
            print_reports(&[commands::download_mappings(&settings).await?])
        }
        Commands::DownloadAssets => print_reports(&[commands::download_assets(&settings).await?]),
        Commands::DownloadNatives => {
            print_reports(&[commands::download_natives(&settings).await?])
        }
        Commands::All => print_reports(&commands::download_all(&settings).await?),
        Commands::Libraries => {
            for library in commands::list_libraries(&settings).await? {
                println!("{}", library);
            }
            true
        }
        Commands::Natives => {
            for url in commands::list_natives(&settings).await? {
                println!("{}", url);
            }
            true
        }
        Commands::ShowConfig => {
            println!("{}", settings.to_json_pretty()?);
            true
        }
    };

    Ok(clean)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(clean) if clean || !cli.strict => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

//! pat CLI: environment bootstrap for the embedding pipeline

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pat_core::download::DownloadEvent;
use pat_core::runtime;
use pat_core::structure::render_structure;
use pat_core::{
    CorpusReport, DownloadReport, Downloader, Environment, EnvironmentConfig, ExecutionContext,
    HostedRuntime, LocalRuntime, PipelineSettings, layout, verify_corpus_files,
};

#[derive(Parser)]
#[command(name = "pat")]
#[command(about = "Environment bootstrap for the embedding pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Execution context (auto probes the runtime)
    #[arg(long, global = true, env = "PAT_CONTEXT", value_enum, default_value_t = ContextArg::Auto)]
    context: ContextArg,

    /// Hosted storage mount point
    #[arg(long, global = true)]
    mount_point: Option<PathBuf>,

    /// Hosted base directory used when the mount fails
    #[arg(long, global = true)]
    fallback_dir: Option<PathBuf>,

    /// Hosted download staging directory
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContextArg {
    Auto,
    Hosted,
    Local,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved environment and corpus readiness
    Status,

    /// Check that the corpus databases exist
    Verify,

    /// Download generated vector files (hosted only)
    Download,

    /// Show the expected project structure
    Structure,

    /// Show or initialize pipeline settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings in effect
    Show,

    /// Write default settings to scripts/pipeline.json
    Init,
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let env = build_environment(&cli);
    let config =
        EnvironmentConfig::resolve(env.as_ref()).context("Failed to resolve environment")?;

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&config, cli.json)?,
        Some(Commands::Verify) => cmd_verify(&config, cli.json)?,
        Some(Commands::Download) => cmd_download(&config, env.as_ref(), cli.json)?,
        Some(Commands::Structure) => println!("{}", render_structure(&config)),
        Some(Commands::Settings { action }) => match action {
            Some(SettingsAction::Show) | None => cmd_settings_show(&config)?,
            Some(SettingsAction::Init) => cmd_settings_init(&config)?,
        },
    }

    Ok(())
}

fn build_environment(cli: &Cli) -> Box<dyn Environment> {
    let context = match cli.context {
        ContextArg::Auto => runtime::detect_context(|key| std::env::var(key).ok()),
        ContextArg::Hosted => ExecutionContext::Hosted,
        ContextArg::Local => ExecutionContext::Local,
    };

    match context {
        ExecutionContext::Hosted => Box::new(hosted_runtime(cli)),
        ExecutionContext::Local => Box::new(LocalRuntime::default()),
    }
}

fn hosted_runtime(cli: &Cli) -> HostedRuntime {
    let mut hosted = HostedRuntime::default();
    if let Some(mount_point) = &cli.mount_point {
        hosted.mount_point = mount_point.clone();
    }
    if let Some(fallback_dir) = &cli.fallback_dir {
        hosted.fallback_dir = fallback_dir.clone();
    }
    if let Some(download_dir) = &cli.download_dir {
        hosted.download_dir = download_dir.clone();
    }
    hosted
}

fn cmd_status(config: &EnvironmentConfig, json: bool) -> Result<()> {
    let report = verify_corpus_files(config);

    if json {
        let value = serde_json::json!({ "environment": config, "corpus": report });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Environment detected: {}",
        config.context.to_string().to_uppercase()
    );
    if let Some(reason) = &config.mount_error {
        println!("⚠ Drive mount failed: {}", reason);
        println!("  Falling back to {}", config.base_dir.display());
    }
    println!();
    println!("Paths:");
    println!("  Base:    {}", config.base_dir.display());
    println!("  Corpora: {}", config.corpora_dir.display());
    println!("  Vectors: {}", config.vectors_dir.display());
    println!();
    println!("Corpus:");
    println!("  Domain:    {}", config.domain);
    println!("  Languages: {}", config.languages.join(", "));
    println!();
    println!("Model:");
    println!("  Name:         {}", config.model_settings.name);
    println!("  Task:         {}", config.model_settings.task);
    println!("  Dimensions:   {}", config.model_settings.dimensions);
    println!("  Max length:   {} chars", config.model_settings.max_text_length);
    println!(
        "  Remote code:  {}",
        if config.model_settings.trust_remote_code { "trusted" } else { "not trusted" }
    );
    println!();
    let levels: Vec<String> = config
        .vector_settings
        .enabled_levels()
        .iter()
        .map(|l| l.to_string())
        .collect();
    println!("Vectors:");
    println!(
        "  Levels:       {}",
        if levels.is_empty() { "none".to_string() } else { levels.join(", ") }
    );
    if let Some(max) = config.processing.max_documents {
        println!("  Max docs:     {}", max);
    }
    println!();
    print_corpus_report(&report);

    Ok(())
}

fn cmd_verify(config: &EnvironmentConfig, json: bool) -> Result<()> {
    let report = verify_corpus_files(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_corpus_report(&report);
    }

    Ok(())
}

fn print_corpus_report(report: &CorpusReport) {
    println!("Verifying corpus files:");
    for entry in &report.entries {
        if entry.present {
            println!("  ✓ {}: {}", entry.language.to_uppercase(), entry.path.display());
        } else {
            println!(
                "  ✗ {}: Missing {}",
                entry.language.to_uppercase(),
                entry.path.display()
            );
        }
    }

    if report.is_ready() {
        println!("All corpus files present.");
    } else {
        println!(
            "{} corpus file(s) missing; continuing with a partial corpus.",
            report.missing().count()
        );
    }
}

fn cmd_download(config: &EnvironmentConfig, env: &dyn Environment, json: bool) -> Result<()> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut downloader = Downloader::new(config, env);
    downloader.set_progress_callback(Box::new({
        let pb = pb.clone();
        move |event: DownloadEvent<'_>| match event {
            DownloadEvent::Checking {
                current,
                total,
                path,
            } => {
                pb.set_length(total as u64);
                pb.set_position(current as u64);
                pb.set_message(path.to_string_lossy().to_string());
            }
        }
    }));

    let report = downloader.run().context("Failed to download vector files")?;

    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report {
        DownloadReport::NotNeeded => {
            println!("Files saved locally - no download needed");
        }
        DownloadReport::Completed {
            downloaded,
            missing,
        } => {
            for path in &downloaded {
                println!("  ✓ Downloaded: {}", display_name(path));
            }
            for path in &missing {
                println!("  ⚠ Not found: {}", display_name(path));
            }
            println!();
            println!("Downloaded {} vector files", downloaded.len());
            println!(
                "Upload these to your local project's vectors/{}/ folder",
                config.domain
            );
        }
    }

    Ok(())
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn cmd_settings_show(config: &EnvironmentConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.settings())?);
    Ok(())
}

fn cmd_settings_init(config: &EnvironmentConfig) -> Result<()> {
    let path = layout::settings_path(&config.base_dir);
    if path.exists() {
        anyhow::bail!("Already initialized: {} exists", path.display());
    }

    PipelineSettings::default().save(&config.base_dir)?;

    println!("Wrote default settings to {}", path.display());

    Ok(())
}

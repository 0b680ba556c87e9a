//! Green Doctor CLI - check a plant leaf photo for signs of disease.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use green_doctor::diagnosis::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use green_doctor::{image, report, Config, Doctor, Error, SecretStore};

/// Check a plant leaf photo for signs of disease using a Gemini vision model.
#[derive(Parser, Debug)]
#[command(name = "green-doctor")]
#[command(version, about, long_about = None)]
struct Args {
    /// Leaf photo (JPEG, PNG or WEBP).
    #[arg(value_name = "IMAGE")]
    input: PathBuf,

    /// TOML file holding GEMINI_API_KEY. Defaults to .streamlit/secrets.toml,
    /// then the user config directory, then the environment.
    #[arg(long, value_name = "PATH")]
    secrets: Option<PathBuf>,

    /// Gemini model name.
    #[arg(short, long, default_value = DEFAULT_MODEL, value_name = "NAME")]
    model: String,

    /// Gemini API root.
    #[arg(long, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    endpoint: String,

    /// Also write the normalized JPEG that was sent.
    #[arg(long, value_name = "PATH")]
    save_normalized: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("green_doctor={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    // The key is checked before the photo is even opened
    let store = SecretStore::discover(args.secrets.clone());
    let credential = match store.credential() {
        Ok(credential) => credential,
        Err(err) if err.needs_setup() => {
            if !matches!(err, Error::MissingCredential { .. }) {
                tracing::warn!("{err}");
            }
            print!("{}", report::render_setup_required());
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("Failed to load secrets"),
    };

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = Config {
        model: args.model.clone(),
        base_url: args.endpoint.clone(),
        ..Config::default()
    };
    let doctor = Doctor::new(config, credential).context("Failed to initialize")?;

    let photo = image::load_image(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    spinner.set_message("🔍 Analyzing your plant image... This may take a few seconds.");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let examination = doctor.examine(photo);

    spinner.finish_and_clear();

    if let (Some(path), Some(normalized)) = (&args.save_normalized, &examination.normalized) {
        normalized
            .save(path)
            .with_context(|| format!("Failed to save normalized image to {}", path.display()))?;
        tracing::info!("Saved normalized image to {}", path.display());
    }

    print!("{}", report::render_diagnosis(&examination.diagnosis));

    Ok(if examination.diagnosis.is_report() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

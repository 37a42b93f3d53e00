use clap::{Parser, Subcommand};
use headshotgen::{
    export,
    logger::{self, LoggerConfig},
    validation, GeminiConfig, HeadshotClient, HeadshotSession, HeadshotStyle, KeyStoreCredentials,
};
use std::path::PathBuf;

/// Turn a personal photo into professional headshots with Gemini
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Also append log lines to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available headshot styles
    Styles,

    /// Generate three headshot variations from a photo
    Generate {
        /// Photo to transform (JPEG, PNG, WebP... up to 5MB)
        #[arg(short, long)]
        image: PathBuf,

        /// Style preset tag (see `styles`)
        #[arg(short, long, default_value = "corporate")]
        style: HeadshotStyle,

        /// Directory the results are written to
        #[arg(short, long, default_value = "headshots")]
        out: PathBuf,

        /// Gemini model override
        #[arg(long, env = "GEMINI_MODEL")]
        model: Option<String>,

        /// Issue the three requests one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Save the Gemini API key to the local key store
    SetKey {
        /// API key from Google AI Studio
        key: String,
    },
}

fn logger_config(args: &Args) -> LoggerConfig {
    let mut config = if args.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::default()
    };
    if args.json_logs {
        config = LoggerConfig::production().with_level(config.min_level);
    }
    if let Some(path) = &args.log_file {
        config = config.with_file_output(path);
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let args = Args::parse();

    logger::init_with_config(logger_config(&args))?;

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    match args.command {
        Command::Styles => {
            for style in HeadshotStyle::ALL {
                println!(
                    "{} {:<14} {:<22} {}",
                    style.emoji(),
                    style.tag(),
                    style.name(),
                    style.description()
                );
            }
        }
        Command::SetKey { key } => {
            let path = KeyStoreCredentials::default_path()
                .ok_or("Cannot locate a home directory for the key store")?;
            KeyStoreCredentials::new(&path).store(key.trim())?;
            log::info!("🔑 API key stored in {}", path.display());
        }
        Command::Generate {
            image,
            style,
            out,
            model,
            sequential,
        } => {
            logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

            let mut config = GeminiConfig::from_env();
            if let Some(model) = model {
                config = config.with_model(model);
            }
            if sequential {
                config = config.sequential();
            }
            logger::log_config_info(&config);

            let source = validation::load_upload(&image).await?;
            let mut session = HeadshotSession::new();
            session.load_original(source.to_data_url());
            session.select_style(style);

            log::info!(
                "{} Generating 3 variations of {}...",
                style.emoji(),
                style.name()
            );
            let client = HeadshotClient::new(config)?;
            if let Err(e) = client.generate_for_session(&mut session).await {
                log::error!("Failed to generate headshots: {}", e);
                if e.is_transport() {
                    log::warn!(
                        "💡 The Gemini request failed, nothing was saved. Try again in a moment"
                    );
                }
                return Err(e.into());
            }

            let paths = export::save_all(&out, session.style(), session.results()).await?;
            for (path, result) in paths.iter().zip(session.results()) {
                println!("{}  ({})", path.display(), result.variation.label());
            }
            if paths.len() < 3 {
                log::warn!("Only {} of 3 variations produced an image", paths.len());
            }
        }
    }

    log::logger().flush();
    Ok(())
}

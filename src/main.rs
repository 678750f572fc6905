use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use strapi_assets::application::{BuildSiteAssetsUseCase, MaterializeDescriptorsUseCase};
use strapi_assets::infrastructure::{
    AppConfig, CliArgs, CmsClient, Command, ConfigLoader, ImageMaterializer,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = ConfigLoader::new().load(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let dotenv = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, "Failed to load .env");
    }

    info!(
        version = strapi_assets::VERSION,
        strapi_url = config.effective_strapi_url(),
        public_dir = %config.public_dir.display(),
        tier = %config.tier,
        "Starting strapi-assets"
    );
    if config.strapi_url.is_none() {
        warn!("STRAPI_URL not set, using default origin");
    }

    let materializer = Arc::new(ImageMaterializer::from_config(config.materializer_config())?);

    let output = match &args.command {
        Command::Pages => {
            let cms = Arc::new(CmsClient::new(
                config.effective_strapi_url(),
                config.strapi_token.clone(),
                config.fetch_timeout(),
            )?);
            let manifest = BuildSiteAssetsUseCase::new(cms, materializer)
                .execute(config.tier)
                .await?;
            serde_json::to_string_pretty(&manifest)?
        }
        Command::Descriptors { file } => {
            let json = read_input(file)?;
            let images = MaterializeDescriptorsUseCase::new(materializer)
                .execute_json(&json, config.tier)
                .await
                .wrap_err("parsing image descriptors")?;
            serde_json::to_string_pretty(&images)?
        }
    };

    println!("{output}");
    Ok(())
}

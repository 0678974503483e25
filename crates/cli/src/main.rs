use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use domain::{ImageAsset, ImageFile};
use service_client::{IngredientRecognizer, KitchenClient, RecipeRecommender, RecommendRequest};
use session::{AppConfig, Session};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

mod render;

/// Fridge Chef - recipes from a photo of your fridge
#[derive(Parser)]
#[command(name = "fridge-chef")]
#[command(about = "Recognize fridge ingredients from a photo and suggest recipes", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the recognition endpoint
    #[arg(long)]
    recognize_url: Option<String>,

    /// Override the recommendation endpoint
    #[arg(long)]
    recommend_url: Option<String>,

    /// Override the per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Override the upload limit in MiB
    #[arg(long)]
    max_upload_mb: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a fridge photo and show recommended recipes
    Analyze {
        /// Photo to upload
        #[arg(long)]
        image: PathBuf,

        /// Open the detail view of this recipe card (1-based)
        #[arg(long)]
        open: Option<usize>,
    },

    /// Only recognize the ingredients in a photo
    Recognize {
        /// Photo to upload
        #[arg(long)]
        image: PathBuf,
    },

    /// Only recommend recipes for a list of ingredients
    Recommend {
        /// Comma-separated ingredient names
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,

        /// Maximum total time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Maximum difficulty (1-5)
        #[arg(long)]
        difficulty_max: Option<u8>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Analyze { image, open } => handle_analyze(config, &image, open).await?,
        Commands::Recognize { image } => handle_recognize(config, &image).await?,
        Commands::Recommend {
            ingredients,
            max_time,
            difficulty_max,
        } => handle_recommend(config, ingredients, max_time, difficulty_max).await?,
        Commands::Config => {
            print!("{}", config.to_toml_string().context("Failed to render config")?);
        }
    }

    Ok(())
}

/// Load the config file, then apply command-line overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    if let Some(url) = &cli.recognize_url {
        config.client.recognize_url = url.clone();
    }
    if let Some(url) = &cli.recommend_url {
        config.client.recommend_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.client.timeout_secs = secs;
    }
    if let Some(mb) = cli.max_upload_mb {
        match mb.checked_mul(1024 * 1024) {
            Some(bytes) => config.session.max_upload_bytes = bytes,
            None => bail!("--max-upload-mb {} is too large", mb),
        }
    }

    Ok(config)
}

fn read_image(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(ImageFile::new(name, bytes))
}

/// Handle the 'analyze' command
async fn handle_analyze(config: AppConfig, path: &Path, open: Option<usize>) -> Result<()> {
    let file = read_image(path)?;
    let client = KitchenClient::new(config.client.clone()).context("Failed to create client")?;
    let mut session = Session::new(client.clone(), client, config.session);

    // Follow view changes the way a UI would re-render
    let mut updates = session.subscribe();
    let watcher = tokio::spawn(async move {
        let mut last = "";
        while updates.changed().await.is_ok() {
            let name = updates.borrow_and_update().view().name();
            if name != last {
                debug!("View changed: {} -> {}", last, name);
                if name == "loading" {
                    eprintln!("{}", "🥕 Analyzing ingredients...".cyan());
                }
                last = name;
            }
        }
    });

    session.start();
    let start = Instant::now();
    let result = session.upload(file).await;
    debug!("Upload handled in {:?}", start.elapsed());

    render::render(session.view(), session.state().error());

    if let Err(err) = result {
        drop(session);
        watcher.await.ok();
        return Err(err).context("Photo was not uploaded");
    }

    if let Some(card) = open {
        println!();
        if card == 0 || !session.select(card - 1) {
            warn!("There is no recipe card {}", card);
        } else {
            render::render(session.view(), None);
            session.dismiss();
        }
    }

    drop(session);
    watcher.await.ok();
    Ok(())
}

/// Handle the 'recognize' command
async fn handle_recognize(config: AppConfig, path: &Path) -> Result<()> {
    let image: ImageAsset = read_image(path)?
        .validate(config.session.max_upload_bytes)
        .context("Photo was not uploaded")?;
    let client = KitchenClient::new(config.client).context("Failed to create client")?;

    let ingredients = client
        .recognize(&image)
        .await
        .context("Ingredient recognition failed")?;

    if ingredients.is_empty() {
        println!("No ingredients were recognized in the photo.");
    } else {
        render::print_ingredients(&ingredients);
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    config: AppConfig,
    ingredients: Vec<String>,
    max_time: Option<u32>,
    difficulty_max: Option<u8>,
) -> Result<()> {
    let ingredients: Vec<String> = ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if ingredients.is_empty() {
        bail!("At least one ingredient is required");
    }

    let mut filters = config.session.filters();
    if let Some(max_time) = max_time {
        filters.max_time = max_time;
    }
    if let Some(difficulty_max) = difficulty_max {
        filters.difficulty_max = difficulty_max;
    }

    let client = KitchenClient::new(config.client).context("Failed to create client")?;
    let recipes = client
        .recommend(&RecommendRequest::new(ingredients, filters))
        .await
        .context("Recipe recommendation failed")?;

    if recipes.is_empty() {
        println!("No recipes matched those ingredients.");
    } else {
        render::print_recipe_cards(&recipes);
    }
    Ok(())
}

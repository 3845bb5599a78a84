mod render;

use anyhow::{bail, Context};
use clap::Parser;
use storefront_api::{Category, StoreApiClient};
use storefront_core::{
    Config, ListingStore, LoadState, MenuAction, MenuNavigator, NavigationStore, ProductCard,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version, about = "Browse a store's category menu and product listings", long_about = None)]
struct Cli {
    /// Store API root, e.g. https://shop.example.com/store-api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Sales channel access key
    #[arg(long, global = true)]
    access_key: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the category menu
    Menu {
        /// Category ids to drill into, in order
        #[arg(long = "path", value_name = "CATEGORY_ID")]
        path: Vec<String>,
    },
    /// Show page 1 of a category's product listing
    Listing {
        /// Category id
        category_id: String,

        /// Category name to show as the listing title
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.store.base_url = base_url;
    }
    if let Some(access_key) = cli.access_key {
        config.store.access_key = access_key;
    }

    match cli.command {
        Some(Commands::Menu { path }) => show_menu(&config, &path, cli.json).await,
        Some(Commands::Listing { category_id, name }) => {
            show_listing(&config, &category_id, name.as_deref(), cli.json).await
        }
        Some(Commands::Config { save }) => show_config(&config, save),
        None => {
            println!("No command specified. Try --help");
            Ok(())
        }
    }
}

fn client(config: &Config) -> anyhow::Result<StoreApiClient> {
    let api_config = config.api_config()?;
    Ok(StoreApiClient::new(api_config)?)
}

async fn show_menu(config: &Config, path: &[String], json: bool) -> anyhow::Result<()> {
    let mut store = NavigationStore::new(client(config)?);

    let categories = match store.load().await {
        LoadState::Loaded(categories) => categories.clone(),
        LoadState::Failed(message) => bail!("{}", message),
        LoadState::Loading => bail!("Menu did not finish loading"),
    };

    let mut menu = MenuNavigator::new(categories.clone());
    for id in path {
        match menu.select(id) {
            Some(MenuAction::Descend) => {}
            Some(MenuAction::OpenListing {
                category_id,
                category_name,
            }) => {
                tracing::info!("{} has no subcategories, showing its listing", category_name);
                return show_listing(config, &category_id, Some(&category_name), json).await;
            }
            None => bail!("{}", missing_category_message(&categories, id)),
        }
    }

    if json {
        let items: Vec<_> = menu.current_items();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render::render_menu(&menu));
    }

    Ok(())
}

/// Why a `--path` id couldn't be entered
fn missing_category_message(roots: &[Category], id: &str) -> String {
    match roots.iter().find_map(|root| root.find(id)) {
        Some(category) => format!(
            "Category {} ({}) is not on this menu level; list its parents first in --path",
            category.name, id
        ),
        None => format!("No category with id {}", id),
    }
}

async fn show_listing(
    config: &Config,
    category_id: &str,
    title: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = ListingStore::new(client(config)?);

    if let LoadState::Failed(message) = store.load(category_id).await {
        bail!("{}", message);
    }

    let cards: Vec<ProductCard> = store
        .products()
        .iter()
        .map(|product| ProductCard::from_product(product, &config.display.currency_symbol))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!("{}", render::render_listing_header(title, store.result_count()));
    for card in &cards {
        println!("{}", render::render_card(card));
    }

    Ok(())
}

fn show_config(config: &Config, save: bool) -> anyhow::Result<()> {
    println!("base_url        = {}", config.store.base_url);
    println!("access_key      = {}", render::mask_secret(&config.store.access_key));
    println!(
        "language_id     = {}",
        config.store.language_id.as_deref().unwrap_or("(default)")
    );
    for (name, value) in &config.store.headers {
        println!("header          = {}: {}", name, value);
    }
    println!("currency_symbol = {}", config.display.currency_symbol);

    if save {
        config.save()?;
        println!("\nSaved to {}", Config::config_path()?.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Category> {
        vec![Category {
            id: "1".into(),
            name: "Damen".into(),
            children: vec![Category {
                id: "2".into(),
                name: "Schuhe".into(),
                children: vec![],
                has_children: false,
            }],
            has_children: true,
        }]
    }

    #[test]
    fn test_missing_category_on_other_level() {
        let message = missing_category_message(&tree(), "2");
        assert!(message.contains("Schuhe"));
        assert!(message.contains("not on this menu level"));
    }

    #[test]
    fn test_missing_category_unknown_id() {
        assert_eq!(missing_category_message(&tree(), "9"), "No category with id 9");
    }
}

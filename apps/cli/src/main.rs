//! haven command-line client
//!
//! Thin driver over `haven-api-client`: search with filters and "show more"
//! pagination, listing CRUD, auth and image upload. Results are printed as
//! pretty JSON so they compose with `jq`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use haven_api_client::{
    ApiClient, ListingDraft, SearchController, UploadConfig, UserUpdate,
};
use haven_search_state::{FilterState, ListingType, SortField, SortOrder};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "haven", version, about = "Client for the haven real-estate marketplace API")]
struct Cli {
    /// API base URL (no trailing slash).
    #[arg(
        long,
        env = "HAVEN_API_URL",
        default_value = "http://localhost:3000/api",
        global = true
    )]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search listings with filters; fetches further pages on request.
    Search {
        /// Free-text search term.
        #[arg(long, default_value = "")]
        term: String,
        /// Listing type: all, rent or sale.
        #[arg(long = "type", value_parser = parse_type, default_value = "all")]
        listing_type: ListingType,
        #[arg(long)]
        parking: bool,
        #[arg(long)]
        furnished: bool,
        #[arg(long)]
        offer: bool,
        /// Sort field: createdAt or regularPrice.
        #[arg(long, value_parser = parse_sort, default_value = "createdAt")]
        sort: SortField,
        /// Sort order: asc or desc.
        #[arg(long, value_parser = parse_order, default_value = "desc")]
        order: SortOrder,
        /// Number of pages to fetch (the first plus "show more" rounds).
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Fetch a single listing by id.
    Get { id: String },
    /// Create a listing from a JSON draft file.
    Create { draft: PathBuf },
    /// Update a listing from a JSON draft file.
    Update { id: String, draft: PathBuf },
    /// Delete a listing.
    Delete { id: String },
    /// List every listing owned by a user.
    MyListings { user_id: String },
    /// Register a new account.
    SignUp {
        username: String,
        email: String,
        password: String,
    },
    /// Sign in; the session cookie lives for the process lifetime.
    SignIn { email: String, password: String },
    /// End the current session.
    SignOut,
    /// Update profile fields of the signed-in user.
    UpdateUser {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Upload an image and print its public URL.
    Upload {
        file: PathBuf,
        #[arg(long, env = "HAVEN_UPLOAD_URL")]
        endpoint: String,
        #[arg(long, env = "HAVEN_UPLOAD_PRESET")]
        preset: String,
    },
}

fn parse_type(value: &str) -> std::result::Result<ListingType, String> {
    ListingType::parse(value).ok_or_else(|| format!("unknown listing type: {value}"))
}

fn parse_sort(value: &str) -> std::result::Result<SortField, String> {
    SortField::parse(value).ok_or_else(|| format!("unknown sort field: {value}"))
}

fn parse_order(value: &str) -> std::result::Result<SortOrder, String> {
    SortOrder::parse(value).ok_or_else(|| format!("unknown sort order: {value}"))
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "haven=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_search(client: ApiClient, filters: FilterState, pages: u32) -> Result<()> {
    let mut search = SearchController::new(client);
    search.submit(filters).await;
    if let Some(err) = search.last_error() {
        bail!("search failed: {err}");
    }

    for _ in 1..pages {
        if !search.has_more() {
            break;
        }
        search.show_more().await;
        if let Some(err) = search.last_error() {
            tracing::warn!(error = %err, "stopping pagination");
            break;
        }
    }

    print_json(&search.listings())?;
    if search.has_more() {
        eprintln!("more results available; re-run with a higher --pages");
    }
    Ok(())
}

fn read_draft(path: &PathBuf) -> Result<ListingDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse draft {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let client = ApiClient::with_base_url(cli.base_url.clone())?;

    match cli.command {
        Command::Search {
            term,
            listing_type,
            parking,
            furnished,
            offer,
            sort,
            order,
            pages,
        } => {
            let filters = FilterState {
                search_term: term,
                listing_type,
                parking,
                furnished,
                offer,
                sort,
                order,
            };
            run_search(client, filters, pages).await?;
        }
        Command::Get { id } => print_json(&client.get_listing(&id).await?)?,
        Command::Create { draft } => {
            let created = client.create_listing(&read_draft(&draft)?).await?;
            print_json(&created)?;
        }
        Command::Update { id, draft } => {
            let updated = client.update_listing(&id, &read_draft(&draft)?).await?;
            print_json(&updated)?;
        }
        Command::Delete { id } => {
            client.delete_listing(&id).await?;
            println!("deleted {id}");
        }
        Command::MyListings { user_id } => print_json(&client.user_listings(&user_id).await?)?,
        Command::SignUp {
            username,
            email,
            password,
        } => {
            client.sign_up(&username, &email, &password).await?;
            println!("account created; sign in to continue");
        }
        Command::SignIn { email, password } => {
            print_json(&client.sign_in(&email, &password).await?)?
        }
        Command::SignOut => client.sign_out().await?,
        Command::UpdateUser {
            id,
            username,
            email,
            password,
            avatar,
        } => {
            let update = UserUpdate {
                username,
                email,
                password,
                avatar,
            };
            print_json(&client.update_user(&id, &update).await?)?;
        }
        Command::Upload {
            file,
            endpoint,
            preset,
        } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("read image {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("image")
                .to_string();
            let config = UploadConfig { endpoint, preset };
            let url = client.upload_image(&config, &filename, bytes).await?;
            println!("{url}");
        }
    }

    Ok(())
}

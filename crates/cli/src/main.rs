//! Trolley CLI - Shop, print and share a weekly grocery list.
//!
//! # Usage
//!
//! ```bash
//! # Walk the store: remaining items grouped by section, in aisle order
//! trolley --snapshot list.json shop
//!
//! # Everything, alphabetically
//! trolley shop --all --sort alphabetical
//!
//! # Paper checklist and shareable text
//! trolley print
//! trolley share
//!
//! # Tick an item off
//! trolley edit status <entry-id> bought
//!
//! # Follow a snapshot that another process keeps up to date
//! trolley watch
//! ```
//!
//! # Commands
//!
//! - `shop` / `print` / `share` - the three list surfaces
//! - `unavailable` / `progress` - share text and counts
//! - `edit` - change an entry and write the snapshot back
//! - `catalog` - browse and extend the catalog
//! - `watch` - live shop surface

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trolley_cli::commands::{self, Context};
use trolley_cli::{Result, TrolleyConfig};
use trolley_core::{
    ComposeOptions, Edit, EntryId, EntryStatus, Price, ProductDraft, ProductId, Quantity,
    SectionDraft, SectionId, ShelfHeight, SortMode,
};

#[derive(Parser)]
#[command(name = "trolley")]
#[command(author, version, about = "Trolley grocery list tools")]
struct Cli {
    /// List snapshot (backend JSON) [default: `TROLLEY_SNAPSHOT`]
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Catalog of sections and products, JSON or YAML [default: `TROLLEY_CATALOG`]
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ShopArgs {
    /// Include bought and unavailable items
    #[arg(short, long)]
    all: bool,

    /// `location` or `alphabetical` (default: `TROLLEY_SORT`, then location)
    #[arg(short, long)]
    sort: Option<SortMode>,
}

impl ShopArgs {
    fn options(&self, config: &TrolleyConfig) -> ComposeOptions {
        ComposeOptions::default()
            .with_completed(self.all)
            .with_sort_mode(self.sort.unwrap_or(config.sort_mode))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Shopping mode with progress
    Shop {
        #[command(flatten)]
        view: ShopArgs,

        /// Show entry ids for use with `edit`
        #[arg(long)]
        ids: bool,
    },
    /// Printable checklist of every item
    Print,
    /// Shareable checklist text
    Share,
    /// Text listing unavailable items
    Unavailable,
    /// Progress counts
    Progress,
    /// Change an entry in the snapshot
    Edit {
        #[command(subcommand)]
        action: EditAction,
    },
    /// Browse and extend the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Re-render the shop surface whenever the snapshot changes
    Watch {
        #[command(flatten)]
        view: ShopArgs,
    },
}

#[derive(Subcommand)]
enum EditAction {
    #[command(flatten)]
    Entry(EntryAction),
    /// Add a catalog product at its default quantity
    Add { product: ProductId },
}

#[derive(Subcommand)]
enum EntryAction {
    /// Add to the quantity (negative to remove; stops at 1)
    Qty {
        entry: EntryId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Set the quantity
    SetQty { entry: EntryId, quantity: i64 },
    /// Set the status (`required`, `bought`, `unavailable`)
    Status { entry: EntryId, status: EntryStatus },
    /// Remove the entry
    Remove { entry: EntryId },
}

impl From<EntryAction> for Edit {
    fn from(action: EntryAction) -> Self {
        match action {
            EntryAction::Qty { entry, delta } => Self::AdjustQuantity { entry, delta },
            EntryAction::SetQty { entry, quantity } => Self::SetQuantity {
                entry,
                quantity: Quantity::clamped(quantity),
            },
            EntryAction::Status { entry, status } => Self::SetStatus { entry, status },
            EntryAction::Remove { entry } => Self::Remove { entry },
        }
    }
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Sections in walking order
    Sections,
    /// One section's products in shelf order
    Section { id: SectionId },
    /// Find products by name or alias
    Search { term: String },
    /// Add a section
    AddSection(SectionArgs),
    /// Rename or move a section
    UpdateSection {
        id: SectionId,
        #[command(flatten)]
        section: SectionArgs,
    },
    /// Delete a section with no products
    RemoveSection { id: SectionId },
    /// Add a product
    AddProduct(ProductArgs),
    /// Replace a product's details
    UpdateProduct {
        id: ProductId,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete a product
    RemoveProduct { id: ProductId },
}

#[derive(Args)]
struct SectionArgs {
    name: String,
    /// Position in the walk (default: after the last section)
    #[arg(long)]
    sequence: Option<i32>,
}

impl From<SectionArgs> for SectionDraft {
    fn from(args: SectionArgs) -> Self {
        Self {
            name: args.name,
            sequence_number: args.sequence,
        }
    }
}

#[derive(Args)]
struct ProductArgs {
    name: String,
    #[arg(long)]
    section: SectionId,
    /// Comma-separated alternative names
    #[arg(long, default_value = "")]
    aliases: String,
    #[arg(long, default_value = "middle")]
    shelf: ShelfHeight,
    /// Position within the section
    #[arg(long)]
    sequence: Option<i32>,
    #[arg(long)]
    price: Option<Price>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    barcode: Option<String>,
    /// Quantity used when the product is added to a list
    #[arg(long)]
    qty: Option<i64>,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            aliases: args.aliases,
            section_id: args.section,
            shelf_height: args.shelf,
            typical_price: args.price,
            notes: args.notes,
            sequence_number: args.sequence,
            product_url: args.url,
            image_url: args.image_url,
            barcode: args.barcode,
            default_quantity: args.qty,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &TrolleyConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match TrolleyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "{e}");
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never mix with command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trolley=info,trolley_cli=info,trolley_core=info".into());

    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!config.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let ctx = Context {
        config,
        snapshot: cli.snapshot,
        catalog: cli.catalog,
        json: cli.json,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&ctx, cli.command, &mut out).await {
        tracing::error!("Command failed: {e}");
        // Exiting skips destructors, so flush Sentry first
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(ctx: &Context, command: Commands, out: &mut impl Write) -> Result<()> {
    dispatch(ctx, command, out).await?;
    out.flush()?;
    Ok(())
}

async fn dispatch(ctx: &Context, command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Shop { view, ids } => {
            commands::list::shop(ctx, view.options(&ctx.config), ids, out).await
        }
        Commands::Print => commands::list::print(ctx, out).await,
        Commands::Share => commands::list::share(ctx, out).await,
        Commands::Unavailable => commands::list::unavailable(ctx, out).await,
        Commands::Progress => commands::list::progress(ctx, out).await,
        Commands::Edit { action } => match action {
            EditAction::Entry(action) => commands::edit::apply(ctx, action.into(), out).await,
            EditAction::Add { product } => commands::edit::add_product(ctx, product, out).await,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Sections => commands::catalog::sections(ctx, out).await,
            CatalogAction::Section { id } => commands::catalog::section(ctx, id, out).await,
            CatalogAction::Search { term } => commands::catalog::search(ctx, &term, out).await,
            CatalogAction::AddSection(section) => {
                commands::catalog::add_section(ctx, section.into(), out).await
            }
            CatalogAction::UpdateSection { id, section } => {
                commands::catalog::update_section(ctx, id, section.into(), out).await
            }
            CatalogAction::RemoveSection { id } => {
                commands::catalog::remove_section(ctx, id, out).await
            }
            CatalogAction::AddProduct(product) => {
                commands::catalog::add_product(ctx, product.into(), out).await
            }
            CatalogAction::UpdateProduct { id, product } => {
                commands::catalog::update_product(ctx, id, product.into(), out).await
            }
            CatalogAction::RemoveProduct { id } => {
                commands::catalog::remove_product(ctx, id, out).await
            }
        },
        Commands::Watch { view } => {
            commands::watch::watch(ctx, view.options(&ctx.config), out).await
        }
    }
}

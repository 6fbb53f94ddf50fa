use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use invento::config::{BACKEND_URL_VAR, REQUEST_TIMEOUT_VAR, TOKEN_FILE_VAR};
use invento::net::types::Product;
use invento::session::{AuthGateway, FileStorage, StorageError};
use invento::state::{
    DashboardState, LoadState, OrganizationHeader, ProductForm, ProductsState, SettingsState, SigninState,
    SignupState, ValidationError, logout,
};
use invento::{ApiError, ClientConfig, ConfigError, HttpApi};
use serde_json::Value;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("http client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("not authenticated; run `invento signin` first")]
    NotAuthenticated,
    #[error("{0}")]
    View(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("product {0} not found")]
    ProductNotFound(String),
    #[error("delete cancelled")]
    Cancelled,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "invento", about = "Inventory dashboard client")]
struct Cli {
    #[arg(long, env = "INVENTO_BACKEND_URL")]
    backend_url: Option<String>,

    #[arg(long, env = "INVENTO_TOKEN_FILE")]
    token_file: Option<String>,

    #[arg(long, env = "INVENTO_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<String>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        organization: String,
    },
    Logout,
    /// Show whether a session token is stored.
    Status,
    Dashboard,
    Products(ProductsCommand),
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List {
        /// Case-insensitive filter on name or SKU.
        #[arg(long, default_value = "")]
        search: String,
    },
    Create(ProductFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductPatch,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ProductFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    sku: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value_t = 0)]
    quantity: u32,
    #[arg(long, default_value_t = 0.0)]
    cost_price: f64,
    #[arg(long, default_value_t = 0.0)]
    selling_price: f64,
    #[arg(long, default_value_t = 5)]
    threshold: u32,
}

#[derive(Args, Debug, Default)]
struct ProductPatch {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    quantity: Option<u32>,
    #[arg(long)]
    cost_price: Option<f64>,
    #[arg(long)]
    selling_price: Option<f64>,
    #[arg(long)]
    threshold: Option<u32>,
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    /// Set the organization's default low-stock threshold.
    Set { threshold: String },
}

struct CliContext {
    api: HttpApi,
    gateway: AuthGateway,
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = client_config(&cli)?;
    let storage = FileStorage::open(&config.token_file)?;
    tracing::debug!(path = %storage.path().display(), "session file opened");
    let ctx = CliContext {
        gateway: AuthGateway::with_storage(Arc::new(storage)),
        api: HttpApi::new(config)?,
        json: cli.json,
    };

    match cli.command {
        Command::Signin { email, password } => run_signin(&ctx, email, password).await,
        Command::Signup { email, password, organization } => run_signup(&ctx, email, password, organization).await,
        Command::Logout => {
            let route = logout(&ctx.gateway)?;
            println!("Signed out. Next: {}", route.path());
            Ok(())
        }
        Command::Status => run_status(&ctx),
        Command::Dashboard => run_dashboard(&ctx).await,
        Command::Products(products) => run_products(&ctx, products).await,
        Command::Settings(settings) => run_settings(&ctx, settings).await,
    }
}

/// Flags win over the environment; both go through the same parser.
fn client_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_lookup(|key| match key {
        BACKEND_URL_VAR => cli.backend_url.clone(),
        TOKEN_FILE_VAR => cli.token_file.clone(),
        REQUEST_TIMEOUT_VAR => cli.timeout_secs.clone(),
        _ => std::env::var(key).ok(),
    })
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_signin(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let mut state = SigninState::new(email, password);
    match state.submit(&ctx.api, &ctx.gateway).await {
        Some(route) => {
            println!("Signed in. Next: {}", route.path());
            Ok(())
        }
        None => Err(CliError::View(state.alert.unwrap_or_default())),
    }
}

async fn run_signup(ctx: &CliContext, email: String, password: String, organization: String) -> Result<(), CliError> {
    let mut state = SignupState::new(email, password, organization);
    match state.submit(&ctx.api).await {
        Some(route) => {
            if let Some(message) = &state.alert {
                println!("{message}");
            }
            println!("Next: {}", route.path());
            Ok(())
        }
        None => Err(CliError::View(state.alert.unwrap_or_default())),
    }
}

fn run_status(ctx: &CliContext) -> Result<(), CliError> {
    let authenticated = ctx.gateway.is_authenticated();
    if ctx.json {
        return print_json(&serde_json::json!({ "authenticated": authenticated }));
    }
    println!("{}", if authenticated { "signed in" } else { "signed out" });
    Ok(())
}

// =============================================================================
// DASHBOARD
// =============================================================================

async fn run_dashboard(ctx: &CliContext) -> Result<(), CliError> {
    let mut header = OrganizationHeader::default();
    header.load(&ctx.api, &ctx.gateway).await;
    let mut state = DashboardState::new();
    state.load(&ctx.api, &ctx.gateway).await;
    let stats = ready(&state.stats)?;

    if ctx.json {
        return print_json(&serde_json::to_value(stats)?);
    }
    println!("{}", header.name);
    println!("Total products: {}", stats.total_products);
    println!("Total stock:    {}", stats.total_stock);
    println!("Low stock:      {}", state.low_stock_count());
    for item in &stats.low_stock_items {
        println!(
            "  {:<24} {:<12} {}",
            item.name,
            item.sku.as_deref().unwrap_or("-"),
            item.quantity_on_hand.map_or_else(|| "-".to_owned(), |quantity| quantity.to_string())
        );
    }
    Ok(())
}

// =============================================================================
// PRODUCTS
// =============================================================================

async fn run_products(ctx: &CliContext, products: ProductsCommand) -> Result<(), CliError> {
    let mut state = ProductsState::new();
    match products.command {
        ProductsSubcommand::List { search } => {
            state.refresh(&ctx.api, &ctx.gateway).await;
            ready(&state.list)?;
            state.search = search;
            print_products(ctx, &state)
        }
        ProductsSubcommand::Create(fields) => {
            let form = fields.into_form();
            state.open_add_dialog();
            let created = state.create(&ctx.api, &ctx.gateway, &form).await;
            finish_mutation(ctx, &state, created)
        }
        ProductsSubcommand::Update { id, fields } => {
            state.refresh(&ctx.api, &ctx.gateway).await;
            ready(&state.list)?;
            let form = state.begin_edit(&id).ok_or_else(|| CliError::ProductNotFound(id.clone()))?;
            let updated = state.update(&ctx.api, &ctx.gateway, &fields.apply(form)).await;
            finish_mutation(ctx, &state, updated)
        }
        ProductsSubcommand::Delete { id, yes } => {
            let confirmed = yes || confirm(&mut io::stdin().lock(), &format!("Delete product {id}?"))?;
            if !confirmed {
                return Err(CliError::Cancelled);
            }
            let deleted = state.delete(&ctx.api, &ctx.gateway, &id, confirmed).await;
            finish_mutation(ctx, &state, deleted)
        }
    }
}

fn finish_mutation(ctx: &CliContext, state: &ProductsState, succeeded: bool) -> Result<(), CliError> {
    if !succeeded {
        if state.list.is_unauthenticated() {
            return Err(CliError::NotAuthenticated);
        }
        return Err(CliError::View(state.alert.clone().unwrap_or_default()));
    }
    match &state.list {
        LoadState::Ready(_) => print_products(ctx, state),
        other => {
            // Mutation landed but the re-fetch did not; report it without failing.
            if let Some(banner) = other.banner() {
                eprintln!("{banner}");
            }
            Ok(())
        }
    }
}

fn print_products(ctx: &CliContext, state: &ProductsState) -> Result<(), CliError> {
    if ctx.json {
        let visible: Vec<&Product> = state.visible();
        return print_json(&serde_json::to_value(visible)?);
    }
    if let Some(message) = state.empty_message() {
        println!("{message}");
        return Ok(());
    }
    println!("{:<10} {:<24} {:<12} {:>8}  {:>10}", "ID", "NAME", "SKU", "QTY", "PRICE");
    for row in state.rows() {
        let marker = if row.low_stock { " LOW" } else { "" };
        println!(
            "{:<10} {:<24} {:<12} {:>8}  {:>10}{marker}",
            row.id, row.name, row.sku, row.quantity, row.selling_price
        );
    }
    Ok(())
}

impl ProductFields {
    fn into_form(self) -> ProductForm {
        ProductForm {
            name: self.name,
            sku: self.sku,
            description: self.description,
            quantity_on_hand: self.quantity,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            low_stock_threshold: self.threshold,
        }
    }
}

impl ProductPatch {
    /// Overlay the given flags on a form prefilled from the stored product.
    fn apply(self, mut form: ProductForm) -> ProductForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(sku) = self.sku {
            form.sku = sku;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(quantity) = self.quantity {
            form.quantity_on_hand = quantity;
        }
        if let Some(cost_price) = self.cost_price {
            form.cost_price = cost_price;
        }
        if let Some(selling_price) = self.selling_price {
            form.selling_price = selling_price;
        }
        if let Some(threshold) = self.threshold {
            form.low_stock_threshold = threshold;
        }
        form
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

async fn run_settings(ctx: &CliContext, settings: SettingsCommand) -> Result<(), CliError> {
    let mut state = SettingsState::new();
    match settings.command {
        SettingsSubcommand::Show => {
            state.load(&ctx.api, &ctx.gateway).await;
            let current = ready(&state.status)?;
            if ctx.json {
                return print_json(&serde_json::to_value(current)?);
            }
            println!("Default low-stock threshold: {}", state.threshold);
            Ok(())
        }
        SettingsSubcommand::Set { threshold } => {
            state.set_threshold_input(&threshold)?;
            let now = Instant::now();
            if state.save(&ctx.api, &ctx.gateway, now).await && state.success_visible(now) {
                println!("Settings saved. Default low-stock threshold: {}", state.threshold);
                return Ok(());
            }
            if state.status.is_unauthenticated() {
                return Err(CliError::NotAuthenticated);
            }
            Err(CliError::View(state.error.unwrap_or_default()))
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Data of a finished read, or the error the view is showing.
fn ready<T>(state: &LoadState<T>) -> Result<&T, CliError> {
    match state {
        LoadState::Ready(value) => Ok(value),
        LoadState::Unauthenticated => Err(CliError::NotAuthenticated),
        LoadState::Failed(message) => Err(CliError::View(message.clone())),
        LoadState::Loading => Err(CliError::View("request did not complete".to_owned())),
    }
}

/// Ask a yes/no question on stderr and read the answer from `input`.
fn confirm(input: &mut impl BufRead, question: &str) -> Result<bool, CliError> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

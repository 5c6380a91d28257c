//! Command-line screens.
//!
//! DESIGN
//! ======
//! Each subcommand plays the part of one screen: it loads what the screen
//! would load, drives the same list, form, stock, and cart state the UI
//! would, and returns the rendered output as a string. `main` prints it, so
//! stdout only ever carries tables or JSON while logs go to stderr.
//!
//! Destructive commands ask a `Prompt` for confirmation. The binary answers
//! from stdin; `--yes` skips the question.
//!
//! ERROR HANDLING
//! ==============
//! Every layer's error converts into `CliError`, which keeps the inner error
//! code so the binary can print `[E_CODE] message` and exit non-zero.

pub mod catalog;
pub mod finance;
pub mod sales;

use std::io::{self, BufRead, Write};

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::config::{parse_log_level, ApiConfig};
use crate::error::ErrorCode;
use crate::model::{Id, Record, Resource};
use crate::net::{ApiClient, ApiError};
use crate::state::table::search;
use crate::state::{AdjustError, CartError, Column, FormError, ListState, ListView, RowAction, TableError};
use crate::util::render::key_values;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Adjust(#[from] AdjustError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Table(#[from] TableError),

    /// A collection failed to load; carries the banner message.
    #[error("{0}")]
    Load(String),

    #[error("argumento inválido: {0}")]
    InvalidArgument(String),

    #[error("operación cancelada")]
    Aborted,

    #[error("error de entrada/salida: {0}")]
    Io(#[from] io::Error),

    #[error("no se pudo generar JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.error_code(),
            Self::Form(e) => e.error_code(),
            Self::Adjust(e) => e.error_code(),
            Self::Cart(e) => e.error_code(),
            Self::Table(e) => e.error_code(),
            Self::Load(_) => "E_LOAD",
            Self::InvalidArgument(_) => "E_INVALID_ARGUMENT",
            Self::Aborted => "E_ABORTED",
            Self::Io(_) => "E_IO",
            Self::Json(_) => "E_JSON",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.retryable(),
            Self::Load(_) => true,
            _ => false,
        }
    }
}

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Inventario, ventas y contabilidad contra la API del negocio")]
pub struct Cli {
    /// Backend base URL; overrides STOCKROOM_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token; overrides STOCKROOM_API_TOKEN.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Print records as JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level from `-v` flags, else from the `STOCKROOM_LOG` value.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` for an unknown level name.
    pub fn log_level(&self, env_value: Option<&str>) -> Result<tracing::Level, ApiError> {
        match self.verbose {
            0 => parse_log_level(env_value),
            1 => Ok(tracing::Level::INFO),
            2 => Ok(tracing::Level::DEBUG),
            _ => Ok(tracing::Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend answers.
    Ping,
    #[command(subcommand)]
    Products(catalog::ProductsCommand),
    #[command(subcommand)]
    Stock(catalog::StockCommand),
    #[command(subcommand)]
    Categories(catalog::CategoriesCommand),
    #[command(subcommand)]
    Suppliers(catalog::SuppliersCommand),
    #[command(subcommand)]
    Customers(catalog::CustomersCommand),
    #[command(subcommand)]
    Sales(sales::SalesCommand),
    #[command(subcommand)]
    Purchases(sales::PurchasesCommand),
    #[command(subcommand)]
    Ledger(finance::LedgerCommand),
    Dashboard(finance::DashboardArgs),
    #[command(subcommand)]
    Reports(finance::ReportsCommand),
}

/// Search and page options shared by every list.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against every field.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Answers yes/no questions before destructive operations.
pub trait Prompt {
    /// # Errors
    ///
    /// Returns an I/O error if the answer cannot be read.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Asks on stderr and reads the answer from stdin.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut err = io::stderr().lock();
        write!(err, "{question} [s/N] ")?;
        err.flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes")
}

pub struct Context {
    pub api: ApiClient,
    pub json: bool,
    prompt: Box<dyn Prompt + Send>,
}

impl Context {
    #[must_use]
    pub fn new(api: ApiClient, json: bool, prompt: Box<dyn Prompt + Send>) -> Self {
        Self { api, json, prompt }
    }

    /// Ask for confirmation unless `assume_yes`.
    ///
    /// # Errors
    ///
    /// `Aborted` when the answer is no, `Io` when it cannot be read.
    pub fn confirm(&mut self, question: &str, assume_yes: bool) -> Result<(), CliError> {
        if assume_yes || self.prompt.confirm(question)? {
            Ok(())
        } else {
            Err(CliError::Aborted)
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Build the client from the environment plus flags, then run the command.
///
/// # Errors
///
/// Returns the configuration error or the command's error.
pub async fn run(cli: Cli, prompt: Box<dyn Prompt + Send>) -> Result<String, CliError> {
    let config = ApiConfig::from_env()?.with_overrides(cli.api_url.as_deref(), cli.token.as_deref())?;
    let mut ctx = Context::new(ApiClient::new(config)?, cli.json, prompt);
    execute(&mut ctx, cli.command).await
}

/// Run one command against an existing context.
///
/// # Errors
///
/// Returns whatever the command fails with.
pub async fn execute(ctx: &mut Context, command: Command) -> Result<String, CliError> {
    match command {
        Command::Ping => {
            ctx.api.ping().await?;
            Ok("ok\n".to_owned())
        }
        Command::Products(cmd) => catalog::run_products(ctx, cmd).await,
        Command::Stock(cmd) => catalog::run_stock(ctx, cmd).await,
        Command::Categories(cmd) => catalog::run_categories(ctx, cmd).await,
        Command::Suppliers(cmd) => catalog::run_suppliers(ctx, cmd).await,
        Command::Customers(cmd) => catalog::run_customers(ctx, cmd).await,
        Command::Sales(cmd) => sales::run_sales(ctx, cmd).await,
        Command::Purchases(cmd) => sales::run_purchases(ctx, cmd).await,
        Command::Ledger(cmd) => finance::run_ledger(ctx, cmd).await,
        Command::Dashboard(args) => finance::run_dashboard(ctx, args).await,
        Command::Reports(cmd) => finance::run_reports(ctx, cmd).await,
    }
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Pretty JSON followed by a newline.
///
/// # Errors
///
/// `Json` if the value cannot be serialized.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Every non-null field of a record as aligned `key: value` lines.
///
/// # Errors
///
/// `Json` if the record cannot be serialized.
pub fn detail<T: Serialize>(record: &T) -> Result<String, CliError> {
    let Value::Object(fields) = serde_json::to_value(record)? else {
        return Ok(String::new());
    };
    let pairs: Vec<(&str, String)> = fields
        .iter()
        .filter(|(_, v)| !v.is_null())
        .filter(|(_, v)| !matches!(v, Value::Array(_)))
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.as_str(), text)
        })
        .collect();
    Ok(key_values(&pairs))
}

/// Load a collection, turning a failed load into its banner error.
///
/// # Errors
///
/// `Load` with the load error message.
pub async fn load_list<R: Resource>(api: &ApiClient) -> Result<ListState<R>, CliError> {
    let mut list = ListState::<R>::default();
    list.refresh(api).await;
    match list.error.take() {
        Some(message) => Err(CliError::Load(message)),
        None => Ok(list),
    }
}

/// Search, paginate, and render a loaded collection, or dump the matches
/// as JSON.
///
/// # Errors
///
/// `Json` if the matches cannot be serialized.
pub fn render_list<T: Serialize + Record>(
    ctx: &Context,
    items: &[T],
    list: &ListArgs,
    actions: &[RowAction],
    columns: &[Column<'_, T>],
) -> Result<String, CliError> {
    let mut view = ListView::default().with_actions(actions);
    view.set_query(list.search.as_str());
    view.set_page(list.page);
    if ctx.json {
        return to_json(&search(items, view.query()));
    }
    Ok(view.render(Some(items), columns).to_text())
}

/// Human label for confirmation prompts.
pub trait Labelled {
    fn label(&self) -> String;
}

/// Confirm and delete one record of a loaded collection.
///
/// The id is resolved through the list view so unknown ids fail before any
/// request is sent.
///
/// # Errors
///
/// `Table` for an unknown id, `Aborted` on a negative answer, or the API error.
pub async fn delete_record<R: Resource + Labelled>(ctx: &mut Context, id: Id, assume_yes: bool) -> Result<String, CliError> {
    let mut list = load_list::<R>(&ctx.api).await?;
    let view = ListView::default().with_actions(&[RowAction::Delete]);
    let event = view.dispatch(RowAction::Delete.tag(), id, &list.items)?;
    let question = format!("¿Eliminar {} '{}' (ID {id})?", R::NOUN, event.record.label());
    ctx.confirm(&question, assume_yes)?;
    list.remove(&ctx.api, id).await?;
    Ok(format!("Se eliminó {} {id}.\n", R::NOUN))
}

/// Assign `value` to `slot` when given.
pub fn set(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

#[cfg(test)]
#[path = "prompt_test.rs"]
pub mod prompt;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

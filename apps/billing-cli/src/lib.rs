//! # FrameIt Billing Library
//!
//! Core library for the `frameit` command. `main.rs` only parses the
//! command line and hands over to [`execute`].
//!
//! ## Module Organization
//! ```text
//! frameit_billing/
//! ├── lib.rs          ◄─── You are here (dispatch & logging)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration (defaults → TOML → env)
//! │   └── session.rs  ◄─── Billing session + order file
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── billing.rs  ◄─── new / customer / summary / preview
//! │   ├── items.rs    ◄─── item editing
//! │   ├── export.rs   ◄─── PDF export
//! │   ├── catalog.rs  ◄─── products / gallery
//! │   └── orders.rs   ◄─── order history / text bills
//! └── error.rs        ◄─── App error type for commands
//! ```
//!
//! ## One Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (stderr, RUST_LOG or "info,frameit=debug")       │
//! │  2. Load ConfigState                                                    │
//! │  3. Load the order file into SessionState (billing commands)            │
//! │  4. Run the command                                                     │
//! │  5. Write the order file back (editing commands only)                   │
//! │  6. Print the output, or the error and exit 1                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::Path;

use chrono::{Local, Utc};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, CustomerArgs, ItemAction, OrdersAction, OrdersArgs, ProductArgs};
use commands::billing::CustomerUpdate;
use commands::catalog::ProductQuery;
use error::AppResult;
use frameit_core::OrderQuery;
use state::{ConfigState, SessionState};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,frameit=debug";

/// Runs one parsed command and returns what to print.
pub async fn execute(cli: Cli) -> AppResult<String> {
    let config = ConfigState::load(cli.config.as_deref())?;
    debug!(command = ?cli.command, "Running command");

    match cli.command {
        Command::New { order, force } => commands::billing::new_order(&order.order, force, &config),

        Command::Customer(args) => {
            let path = args.order.order.clone();
            edit(&path, &config, |session| {
                Ok(commands::billing::update_customer(session, customer_update(args)))
            })
        }

        Command::Item { action } => match action {
            ItemAction::Add { order } => {
                edit(&order.order, &config, |s| Ok(commands::items::add_item(s)))
            }
            ItemAction::Remove { order, id } => edit(&order.order, &config, |s| {
                commands::items::remove_item(s, &id)
            }),
            ItemAction::Update {
                order,
                id,
                field,
                value,
            } => edit(&order.order, &config, |s| {
                commands::items::update_item(s, &config, &id, &field, &value)
            }),
            ItemAction::AddProduct { order, product_id } => edit(&order.order, &config, |s| {
                commands::items::add_product(s, product_id)
            }),
        },

        Command::Summary { order, json } => {
            let session = SessionState::load(&order.order, config.default_gst_rate)?;
            commands::billing::summary(&session, &config, json)
        }

        Command::Preview { order, export, out } => {
            let session = SessionState::load(&order.order, config.default_gst_rate)?;
            let (now, today) = (Utc::now(), Local::now().date_naive());
            if !export {
                return commands::billing::preview(&session, &config, now, today);
            }

            let document = commands::billing::create_preview(&session, &config, now, today)?;
            let saved = commands::export::save_pdf(&session, &config, &document, out).await?;
            Ok(format!(
                "{}\n\n{}",
                commands::billing::render_invoice_text(&document, &config),
                saved.message()
            ))
        }

        Command::Export { order, out } => {
            let session = SessionState::load(&order.order, config.default_gst_rate)?;
            let saved = commands::export::export_invoice(
                &session,
                &config,
                out,
                Utc::now(),
                Local::now().date_naive(),
            )
            .await?;
            Ok(saved.message())
        }

        Command::Products(args) => {
            commands::catalog::products(&product_query(&args), &config, args.json)
        }

        Command::Product { id } => commands::catalog::product(id, &config),

        Command::Gallery { category, search } => Ok(commands::catalog::gallery(
            category.as_deref(),
            search.as_deref(),
        )),

        Command::Orders(args) => match args.action {
            Some(OrdersAction::Bill { ref id, ref out }) => {
                let saved = commands::orders::save_order_bill(id, &config, out.clone()).await?;
                Ok(format!("{}\nBill saved to {}", saved.text, saved.path.display()))
            }
            None => commands::orders::list_orders(&order_query(&args), &config, args.json),
        },
    }
}

/// Loads the order file, runs `f`, and writes the file back if `f` succeeded.
fn edit<F>(path: &Path, config: &ConfigState, f: F) -> AppResult<String>
where
    F: FnOnce(&SessionState) -> AppResult<String>,
{
    let session = SessionState::load(path, config.default_gst_rate)?;
    let output = f(&session)?;
    session.save(path)?;
    Ok(output)
}

fn customer_update(args: CustomerArgs) -> CustomerUpdate {
    CustomerUpdate {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        invoice_number: args.invoice_number,
    }
}

fn product_query(args: &ProductArgs) -> ProductQuery {
    ProductQuery {
        size: args.size.clone(),
        min: args.min,
        max: args.max,
        sort: args.sort.clone(),
    }
}

fn order_query(args: &OrdersArgs) -> OrderQuery {
    OrderQuery {
        search: args.search.clone(),
        from: args.from,
        to: args.to,
        sort: args.sort,
        descending: args.desc,
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages from every crate
/// - `RUST_LOG=frameit_core=trace` - Trace billing logic only
/// - Default: `info,frameit=debug`
///
/// Logs go to stderr so printed previews stay clean.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

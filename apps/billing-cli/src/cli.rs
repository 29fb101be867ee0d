//! Command line definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use frameit_core::orders::OrderSort;

#[derive(Debug, Parser)]
#[command(name = "frameit", version, about = "Bills and GST invoices for a photo framing shop")]
pub struct Cli {
    /// Config file (default: the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a new bill: empty customer, one blank item
    New {
        #[command(flatten)]
        order: OrderArg,
        /// Overwrite an existing order file
        #[arg(long)]
        force: bool,
    },
    /// Set customer details
    Customer(CustomerArgs),
    /// Add, remove or edit order items
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Show the quick summary and per-item totals
    Summary {
        #[command(flatten)]
        order: OrderArg,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create the bill preview and print the invoice
    Preview {
        #[command(flatten)]
        order: OrderArg,
        /// Also save the printed invoice as a PDF
        #[arg(long)]
        export: bool,
        /// Output directory for --export
        #[arg(long, value_name = "DIR", requires = "export")]
        out: Option<PathBuf>,
    },
    /// Create the bill preview and save it as a PDF
    Export {
        #[command(flatten)]
        order: OrderArg,
        /// Output directory (default: configured or downloads folder)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Browse the frame catalog
    Products(ProductArgs),
    /// Show one catalog product
    Product {
        id: u32,
    },
    /// Browse the gallery
    Gallery {
        /// Category, or "All"
        #[arg(long)]
        category: Option<String>,
        /// Text to look for in titles and categories
        #[arg(long)]
        search: Option<String>,
    },
    /// Search past orders, or save the bill of one
    Orders(OrdersArgs),
}

#[derive(Debug, Args)]
pub struct OrderArg {
    /// Order file (JSON)
    #[arg(long, value_name = "FILE")]
    pub order: PathBuf,
}

#[derive(Debug, Args)]
pub struct CustomerArgs {
    #[command(flatten)]
    pub order: OrderArg,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Invoice number to print instead of a generated one ("" clears it)
    #[arg(long)]
    pub invoice_number: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ItemAction {
    /// Append a blank item
    Add {
        #[command(flatten)]
        order: OrderArg,
    },
    /// Remove an item by id
    Remove {
        #[command(flatten)]
        order: OrderArg,
        id: String,
    },
    /// Change one field of an item
    Update {
        #[command(flatten)]
        order: OrderArg,
        id: String,
        /// name, price, quantity or gst
        field: String,
        /// New text; may be empty
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Append an item from a catalog product
    AddProduct {
        #[command(flatten)]
        order: OrderArg,
        product_id: u32,
    },
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Size, e.g. 12x18
    #[arg(long)]
    pub size: Option<String>,
    /// Minimum price in rupees
    #[arg(long)]
    pub min: Option<u32>,
    /// Maximum price in rupees
    #[arg(long)]
    pub max: Option<u32>,
    /// default, price-low, price-high or name
    #[arg(long, default_value = "default")]
    pub sort: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub action: Option<OrdersAction>,
    /// Text to look for in customer names, order ids and products
    #[arg(long)]
    pub search: Option<String>,
    /// First purchase date to include
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,
    /// Last purchase date to include
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,
    /// date or amount (default: as listed)
    #[arg(long)]
    pub sort: Option<OrderSort>,
    /// Newest or largest first
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// Print an order's bill and save it as a text file
    Bill {
        id: String,
        /// Output directory (default: configured or downloads folder)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_item_update() {
        let cli = Cli::try_parse_from([
            "frameit", "item", "update", "--order", "bill.json", "abc", "price", "250",
        ])
        .unwrap();

        match cli.command {
            Command::Item {
                action: ItemAction::Update { order, id, field, value },
            } => {
                assert_eq!(order.order, PathBuf::from("bill.json"));
                assert_eq!(id, "abc");
                assert_eq!(field, "price");
                assert_eq!(value, "250");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_preview_out_needs_export() {
        assert!(Cli::try_parse_from(["frameit", "preview", "--order", "b.json", "--out", "d"]).is_err());

        let cli = Cli::try_parse_from([
            "frameit", "preview", "--order", "b.json", "--export", "--out", "d",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Preview { export: true, out: Some(_), .. }
        ));
    }

    #[test]
    fn test_parse_orders_query() {
        let cli = Cli::try_parse_from([
            "frameit", "orders", "--search", "frame", "--from", "2024-01-10", "--sort", "amount",
            "--desc",
        ])
        .unwrap();

        match cli.command {
            Command::Orders(args) => {
                assert!(args.action.is_none());
                assert_eq!(args.search.as_deref(), Some("frame"));
                assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 1, 10));
                assert_eq!(args.sort, Some(OrderSort::Amount));
                assert!(args.desc);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["frameit", "orders", "--from", "10/01/2024"]).is_err());
        assert!(Cli::try_parse_from(["frameit", "orders", "--sort", "name"]).is_err());
        assert!(Cli::try_parse_from(["frameit", "orders", "--desc"]).is_err());
    }

    #[test]
    fn test_parse_order_bill() {
        let cli = Cli::try_parse_from(["frameit", "orders", "bill", "ORD003"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Orders(OrdersArgs {
                action: Some(OrdersAction::Bill { ref id, out: None }),
                ..
            }) if id == "ORD003"
        ));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["frameit", "products", "--config", "shop.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
    }
}

//! # Catalog Commands
//!
//! Read-only browsing of the frame catalog and the gallery.

use comfy_table::{Cell, CellAlignment, Table};

use frameit_core::catalog::{
    browse_products, categories, filter_gallery, get_product, unique_sizes, ProductFilter,
    ProductSort,
};

use crate::error::{AppError, AppResult};
use crate::state::ConfigState;

/// Product listing filters as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub size: Option<String>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub sort: String,
}

impl ProductQuery {
    fn filter(&self) -> ProductFilter {
        let defaults = ProductFilter::default();
        ProductFilter {
            size: self.size.clone(),
            min_price: self.min.unwrap_or(defaults.min_price),
            max_price: self.max.unwrap_or(defaults.max_price),
        }
    }

    fn sort(&self) -> AppResult<ProductSort> {
        if self.sort.trim().is_empty() {
            return Ok(ProductSort::Default);
        }
        self.sort.parse().map_err(AppError::validation)
    }
}

/// Lists products matching `query`.
pub fn products(query: &ProductQuery, config: &ConfigState, json: bool) -> AppResult<String> {
    let list = browse_products(&query.filter(), query.sort()?);

    if json {
        return Ok(serde_json::to_string_pretty(&list)?);
    }
    if list.is_empty() {
        return Ok(format!(
            "No frames match. Sizes available: {}",
            unique_sizes().join(", ")
        ));
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Frame", "Size", "Price", "Category"]);
    for product in &list {
        table.add_row(vec![
            Cell::new(product.id),
            Cell::new(product.title),
            Cell::new(product.size),
            Cell::new(format!("{}{}", config.currency_symbol, product.price))
                .set_alignment(CellAlignment::Right),
            Cell::new(product.category),
        ]);
    }
    Ok(table.to_string())
}

/// Shows one product in full.
pub fn product(id: u32, config: &ConfigState) -> AppResult<String> {
    let product = get_product(id)?;
    let mut out = format!(
        "{} (#{})\n{}{}  |  {}  |  {}\n\n{}\n",
        product.title,
        product.id,
        config.currency_symbol,
        product.price,
        product.size,
        product.category,
        product.description
    );
    for image in product.images {
        out.push_str(&format!("\n  {}", image));
    }
    Ok(out)
}

/// Lists gallery items in `category` whose text contains `search`.
pub fn gallery(category: Option<&str>, search: Option<&str>) -> String {
    let items = filter_gallery(category, search);
    if items.is_empty() {
        return format!(
            "Nothing in the gallery matches. Categories: {}",
            categories().join(", ")
        );
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Category", "Date"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(item.title),
            Cell::new(item.category),
            Cell::new(item.date.unwrap_or("-")),
        ]);
    }
    table.to_string()
}

//! # Catalog
//!
//! Read-only product and gallery data bundled with the application, plus
//! the in-memory filters the catalog and gallery pages apply.
//!
//! ```text
//! products() ──► filter_products(&ProductFilter) ──► sort_products(ProductSort)
//!                        │                                   │
//!                 size token + price range         default / price / name
//!
//! gallery_items() ──► filter_gallery(category, search)
//! ```
//!
//! Nothing here is ever written. Billing only reads a product to seed an
//! order item (see [`crate::types::OrderItem::from_product`]).

use serde::Serialize;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Upper end of the catalog page's price slider.
pub const MAX_PRICE_FILTER: u32 = 5000;

/// Label of the "show everything" gallery category.
pub const ALL_CATEGORIES: &str = "All";

// =============================================================================
// Products
// =============================================================================

/// A framing product from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u32,
    pub title: &'static str,
    /// Whole rupees.
    pub price: u32,
    pub size: &'static str,
    pub image: &'static str,
    pub images: &'static [&'static str],
    pub description: &'static str,
    pub category: &'static str,
}

impl Product {
    /// The leading size token, e.g. `"12x18"` for `"12x18 inches"`.
    pub fn size_token(&self) -> &'static str {
        self.size.split(' ').next().unwrap_or(self.size)
    }
}

static PRODUCTS: [Product; 6] = [
    Product {
        id: 1,
        title: "Premium Wooden Frame",
        price: 899,
        size: "12x18 inches",
        image: "/images/frames/frame1.jpg",
        images: &["/images/frames/frame1.jpg", "/images/frames/frame1b.jpg"],
        description: "High quality wooden frame with elegant finish.",
        category: "Wooden Frame",
    },
    Product {
        id: 2,
        title: "Classic Metal Frame",
        price: 1299,
        size: "16x20 inches",
        image: "/images/frames/frame2.jpg",
        images: &["/images/frames/frame2.jpg", "/images/frames/frame2b.jpg"],
        description: "Durable metal frame with modern design.",
        category: "Metal Frame",
    },
    Product {
        id: 3,
        title: "Antique Victorian Frame",
        price: 2499,
        size: "18x24 inches",
        image: "/images/frames/frame3.jpg",
        images: &["/images/frames/frame3.jpg", "/images/frames/frame3b.jpg"],
        description: "Vintage-style ornate frame with intricate details.",
        category: "Antique Frame",
    },
    Product {
        id: 4,
        title: "Minimalist Glass Frame",
        price: 799,
        size: "8x10 inches",
        image: "/images/frames/frame4.jpg",
        images: &["/images/frames/frame4.jpg", "/images/frames/frame4b.jpg"],
        description: "Simple and elegant glass frame for modern decor.",
        category: "Glass Frame",
    },
    Product {
        id: 5,
        title: "Luxury Gold Frame",
        price: 3299,
        size: "20x30 inches",
        image: "/images/frames/frame5.jpg",
        images: &["/images/frames/frame5.jpg", "/images/frames/frame5b.jpg"],
        description: "Premium gold-plated frame for masterpiece artwork.",
        category: "Luxury Frame",
    },
    Product {
        id: 6,
        title: "Custom Canvas Frame",
        price: 1899,
        size: "14x18 inches",
        image: "/images/frames/frame6.jpg",
        images: &["/images/frames/frame6.jpg", "/images/frames/frame6b.jpg"],
        description: "Handcrafted canvas frame perfect for paintings.",
        category: "Canvas Frame",
    },
];

/// All catalog products in catalog order.
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Looks up a product by id.
pub fn find_product(id: u32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Like [`find_product`], but a miss is an error.
pub fn get_product(id: u32) -> CoreResult<&'static Product> {
    find_product(id).ok_or(CoreError::ProductNotFound(id))
}

/// Distinct size tokens in catalog order.
pub fn unique_sizes() -> Vec<&'static str> {
    let mut sizes: Vec<&'static str> = Vec::new();
    for token in PRODUCTS.iter().map(Product::size_token) {
        if !sizes.contains(&token) {
            sizes.push(token);
        }
    }
    sizes
}

/// Filters offered by the catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Substring the product size must contain; `None` means all sizes.
    pub size: Option<String>,
    pub min_price: u32,
    pub max_price: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        ProductFilter {
            size: None,
            min_price: 0,
            max_price: MAX_PRICE_FILTER,
        }
    }
}

impl ProductFilter {
    /// True when `product` passes both the size and the price filter.
    pub fn matches(&self, product: &Product) -> bool {
        let size_ok = match self.size.as_deref() {
            None | Some("all") => true,
            Some(size) => product.size.contains(size),
        };
        size_ok && product.price >= self.min_price && product.price <= self.max_price
    }
}

/// Sort orders offered by the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Name,
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ProductSort::Default),
            "price-low" | "price_low" => Ok(ProductSort::PriceLow),
            "price-high" | "price_high" => Ok(ProductSort::PriceHigh),
            "name" => Ok(ProductSort::Name),
            other => Err(format!(
                "unknown sort '{}' (expected default, price-low, price-high or name)",
                other
            )),
        }
    }
}

/// Applies `filter`, then `sort`. Sorting is stable.
///
/// ```rust
/// use frameit_core::catalog::{browse_products, ProductFilter, ProductSort};
///
/// let cheap = ProductFilter { max_price: 1000, ..Default::default() };
/// let titles: Vec<_> = browse_products(&cheap, ProductSort::PriceLow)
///     .iter()
///     .map(|p| p.title)
///     .collect();
/// assert_eq!(titles, ["Minimalist Glass Frame", "Premium Wooden Frame"]);
/// ```
pub fn browse_products(filter: &ProductFilter, sort: ProductSort) -> Vec<&'static Product> {
    let mut list: Vec<&'static Product> = PRODUCTS.iter().filter(|p| filter.matches(p)).collect();

    match sort {
        ProductSort::Default => {}
        ProductSort::PriceLow => list.sort_by_key(|p| p.price),
        ProductSort::PriceHigh => list.sort_by(|a, b| b.price.cmp(&a.price)),
        ProductSort::Name => list.sort_by_key(|p| p.title.to_lowercase()),
    }
    list
}

// =============================================================================
// Gallery
// =============================================================================

/// A showcased framing job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub cover_image: &'static str,
    pub images: &'static [&'static str],
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<&'static str>,
}

const WALL: &str = "images/wallpaperflare.com_wallpaper.jpg";
const WALL_1: &str = "images/wallpaperflare.com_wallpaper1.jpg";
const WALL_2: &str = "images/wallpaperflare.com_wallpaper (1).jpg";

static GALLERY: [GalleryItem; 6] = [
    GalleryItem {
        id: 1,
        title: "Radha Krishna Painting",
        category: "Religious Art",
        cover_image: WALL,
        images: &[WALL, WALL_1, WALL_2],
        description: "A detailed hand-made canvas painting depicting the divine love of Radha Krishna, created with vibrant colors and intricate details.",
        video: Some("https://youtube.com/embed/example1"),
        date: None,
    },
    GalleryItem {
        id: 2,
        title: "Landscape Sunset",
        category: "Landscape",
        cover_image: WALL_1,
        images: &[WALL_1, WALL],
        description: "Beautiful sunset landscape painting capturing the golden hour with stunning color transitions.",
        video: None,
        date: None,
    },
    GalleryItem {
        id: 3,
        title: "Custom Family Portrait",
        category: "Portrait",
        cover_image: WALL_2,
        images: &[WALL_2, WALL],
        description: "Personalized family portrait commissioned for a special anniversary celebration.",
        video: None,
        date: None,
    },
    GalleryItem {
        id: 4,
        title: "Abstract Modern Art",
        category: "Abstract",
        cover_image: WALL,
        images: &[WALL, WALL_1],
        description: "Contemporary abstract piece using bold colors and dynamic brush strokes.",
        video: None,
        date: None,
    },
    GalleryItem {
        id: 5,
        title: "Taj Mahal Frame",
        category: "Monument",
        cover_image: WALL_1,
        images: &[WALL_1, WALL_2, WALL],
        description: "Elegant framing of the Taj Mahal with custom decorative borders and archival quality materials.",
        video: Some("https://youtube.com/embed/example2"),
        date: None,
    },
    GalleryItem {
        id: 6,
        title: "Nature floral",
        category: "Nature",
        cover_image: WALL_2,
        images: &[WALL_2, WALL_1],
        description: "Delicate floral composition featuring seasonal blooms in a harmonious arrangement.",
        video: None,
        date: None,
    },
];

/// All gallery items in gallery order.
pub fn gallery_items() -> &'static [GalleryItem] {
    &GALLERY
}

/// Looks up a gallery item by id.
pub fn find_gallery_item(id: u32) -> Option<&'static GalleryItem> {
    GALLERY.iter().find(|g| g.id == id)
}

/// Like [`find_gallery_item`], but a miss is an error.
pub fn get_gallery_item(id: u32) -> CoreResult<&'static GalleryItem> {
    find_gallery_item(id).ok_or(CoreError::GalleryItemNotFound(id))
}

/// `"All"` followed by each distinct category in gallery order.
pub fn categories() -> Vec<&'static str> {
    let mut list = vec![ALL_CATEGORIES];
    for item in GALLERY.iter() {
        if !list.contains(&item.category) {
            list.push(item.category);
        }
    }
    list
}

/// Filters by exact category (`"All"` or `None` keeps everything), then by
/// a case-insensitive search over title and category.
pub fn filter_gallery(category: Option<&str>, search: Option<&str>) -> Vec<&'static GalleryItem> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    GALLERY
        .iter()
        .filter(|item| match category {
            None => true,
            Some(c) if c == ALL_CATEGORIES => true,
            Some(c) => item.category == c,
        })
        .filter(|item| match &needle {
            None => true,
            Some(n) => {
                item.title.to_lowercase().contains(n.as_str())
                    || item.category.to_lowercase().contains(n.as_str())
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(products().len(), 6);
        assert_eq!(find_product(5).unwrap().title, "Luxury Gold Frame");
        assert!(find_product(99).is_none());
        assert!(matches!(get_product(99), Err(CoreError::ProductNotFound(99))));
    }

    #[test]
    fn test_unique_sizes() {
        assert_eq!(
            unique_sizes(),
            vec!["12x18", "16x20", "18x24", "8x10", "20x30", "14x18"]
        );
    }

    #[test]
    fn test_size_filter_is_substring_match() {
        let filter = ProductFilter {
            size: Some("18".to_string()),
            ..Default::default()
        };
        let ids: Vec<u32> = browse_products(&filter, ProductSort::Default)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 6]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let filter = ProductFilter {
            size: None,
            min_price: 899,
            max_price: 1899,
        };
        let ids: Vec<u32> = browse_products(&filter, ProductSort::Default)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 6]);
    }

    #[test]
    fn test_sorts() {
        let all = ProductFilter::default();

        let high: Vec<u32> = browse_products(&all, ProductSort::PriceHigh)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(high, vec![5, 3, 6, 2, 1, 4]);

        let by_name: Vec<&str> = browse_products(&all, ProductSort::Name)
            .iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(by_name[0], "Antique Victorian Frame");
        assert_eq!(by_name[5], "Premium Wooden Frame");
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price-low".parse::<ProductSort>(), Ok(ProductSort::PriceLow));
        assert_eq!("NAME".parse::<ProductSort>(), Ok(ProductSort::Name));
        assert!("cheapest".parse::<ProductSort>().is_err());
    }

    #[test]
    fn test_gallery_categories() {
        let cats = categories();
        assert_eq!(cats[0], "All");
        assert_eq!(cats.len(), 7);
    }

    #[test]
    fn test_gallery_filter() {
        assert_eq!(filter_gallery(None, None).len(), 6);
        assert_eq!(filter_gallery(Some("All"), None).len(), 6);

        let portraits = filter_gallery(Some("Portrait"), None);
        assert_eq!(portraits.len(), 1);
        assert_eq!(portraits[0].id, 3);

        let search: Vec<u32> = filter_gallery(None, Some("LAND"))
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(search, vec![2]);

        assert!(filter_gallery(Some("Portrait"), Some("taj")).is_empty());
        assert!(matches!(
            get_gallery_item(42),
            Err(CoreError::GalleryItemNotFound(42))
        ));
    }
}

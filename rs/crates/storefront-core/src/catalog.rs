use crate::pricing::format_price;

/// Product variant. The only behavior that differs between variants is label
/// formatting, so this is a plain tagged enum rather than a trait hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    Physical,
    Digital { file_size_mb: u32 },
}

impl ProductKind {
    /// Short tag shown on the product card
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Digital { .. } => "digital",
        }
    }
}

/// A purchasable item. Created once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub kind: ProductKind,
    pub img: String,
}

impl Product {
    pub fn physical(id: u32, name: &str, price: f64, img: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            kind: ProductKind::Physical,
            img: img.to_string(),
        }
    }

    pub fn digital(id: u32, name: &str, price: f64, file_size_mb: u32, img: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            kind: ProductKind::Digital { file_size_mb },
            img: img.to_string(),
        }
    }

    /// One-line description shown by the Info action.
    pub fn label(&self) -> String {
        match self.kind {
            ProductKind::Physical => {
                format!("{} - S/ {}", self.name, format_price(self.price))
            }
            ProductKind::Digital { file_size_mb } => {
                format!(
                    "{} (digital {}MB) - S/ {}",
                    self.name,
                    file_size_mb,
                    format_price(self.price)
                )
            }
        }
    }
}

/// The fixed set of products for the session, addressable by id.
///
/// Populated once from the seed list; order is preserved everywhere.
/// Duplicate seed ids are a programmer error and are not handled.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build the catalog from an explicit product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo seed catalog.
    pub fn seed() -> Self {
        Self::new(vec![
            Product::physical(1, "Auriculares BT", 79.90, "img/auricularesbt.jpg"),
            Product::physical(2, "Teclado mecánico", 249.00, "img/teclado.jpg"),
            Product::digital(3, "Ebook: Aprender JS", 20.00, 5, "img/ebookaprender.jpg"),
            Product::physical(4, "Mouse inalámbrico", 89.50, "img/mouse.jpg"),
            Product::physical(5, "Monitor Gamer 27\"", 999.00, "img/monitorgamer.jpg"),
            Product::physical(6, "Laptop ASUS Intel i7", 3500.00, "img/laptopasus.jpg"),
            Product::physical(7, "Micrófono Condensador USB", 149.00, "img/microfono.jpg"),
        ])
    }

    /// Lookup by product id.
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Full product list in seed order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Subsequence of products satisfying the predicate, in seed order.
    pub fn filter<F>(&self, pred: F) -> Vec<&Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.products.iter().filter(|p| pred(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique_and_ordered() {
        let catalog = Catalog::seed();
        let ids: Vec<u32> = catalog.all().iter().map(|p| p.id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.get(3).map(|p| p.kind.tag()), Some("digital"));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn filter_preserves_order() {
        let catalog = Catalog::seed();
        let cheap = catalog.filter(|p| p.price < 100.0);
        let ids: Vec<u32> = cheap.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn label_formats_per_variant() {
        let p = Product::physical(1, "Auriculares BT", 79.90, "img/a.jpg");
        assert_eq!(p.label(), "Auriculares BT - S/ 79.90");

        let d = Product::digital(3, "Ebook: Aprender JS", 20.00, 5, "img/e.jpg");
        assert_eq!(d.label(), "Ebook: Aprender JS (digital 5MB) - S/ 20.00");
    }
}

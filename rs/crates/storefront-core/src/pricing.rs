use crate::cart::Cart;
use crate::catalog::{Catalog, Product};

/// Price of one cart line.
pub fn line_total(product: &Product, qty: u32) -> f64 {
    product.price * f64::from(qty)
}

/// Sum of line totals over the whole cart. A line whose product cannot be
/// resolved in the catalog contributes zero.
pub fn cart_total(cart: &Cart, catalog: &Catalog) -> f64 {
    let totals: Vec<f64> = cart
        .lines()
        .map(|(id, qty)| catalog.get(id).map_or(0.0, |p| line_total(p, qty)))
        .collect();
    sum_recursive(&totals)
}

/// Recursive reduction: empty list is 0, a singleton is its value, otherwise
/// head plus the sum of the tail. The reduction order is part of the
/// aggregation contract.
pub fn sum_recursive(items: &[f64]) -> f64 {
    match items {
        [] => 0.0,
        [only] => *only,
        [first, rest @ ..] => first + sum_recursive(rest),
    }
}

/// Render a price with exactly two decimal digits, `.` separator, no
/// grouping.
pub fn format_price(x: f64) -> String {
    format!("{x:.2}")
}

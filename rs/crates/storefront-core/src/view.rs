//! Presentation layer: the full DOM tree as a pure function of `AppState`.
//!
//! Every store mutation is followed by a complete re-render of this tree;
//! nothing here keeps state between renders.

use storefront_dom::{DomNode, Snapshot};

use crate::catalog::Product;
use crate::pricing::{cart_total, format_price, line_total};
use crate::state::{AppState, CheckoutPhase, SLIDE_COUNT};

pub const CONFIRM_CLEAR: &str = "Empty the cart?";

/// Build the complete snapshot for the current state.
pub fn snapshot(state: &AppState) -> Snapshot {
    let mut root = DomNode::elem("div")
        .key("app")
        .attr("class", "app")
        .child(header(state))
        .child(slideshow(state))
        .child(search_bar(state))
        .child(product_grid(state))
        .child(cart_panel(state));

    if let Some(text) = &state.toast {
        root = root.child(toast(text));
    }

    Snapshot::new(root)
}

fn header(state: &AppState) -> DomNode {
    DomNode::elem("header")
        .key("header")
        .attr("class", "site-header")
        .child(DomNode::text("h1", "Storefront"))
        .child(
            DomNode::text("button", "Cart")
                .key("view-cart")
                .attr("class", "view-cart-btn")
                .event("click", "toggle_cart")
                .child(
                    DomNode::text("span", &state.cart.total_items().to_string())
                        .key("cart-count")
                        .attr("class", "cart-count"),
                ),
        )
}

fn slideshow(state: &AppState) -> DomNode {
    let slides = (0..SLIDE_COUNT).map(|i| {
        let class = if i == state.slide_index {
            "slide active"
        } else {
            "slide"
        };
        DomNode::elem("div")
            .key(&format!("slide-{i}"))
            .attr("class", class)
    });
    DomNode::elem("div")
        .key("slideshow")
        .attr("class", "slideshow")
        .children(slides)
}

fn search_bar(state: &AppState) -> DomNode {
    DomNode::elem("input")
        .key("search")
        .attr("type", "text")
        .attr("placeholder", "Search products...")
        .attr("data-hotkey", "/")
        .attr("data-focus-gen", &state.focus_gen.to_string())
        .event("input", "search")
}

fn product_grid(state: &AppState) -> DomNode {
    DomNode::elem("section")
        .key("products")
        .attr("class", "products")
        .children(state.visible_products().into_iter().map(product_card))
}

fn product_card(product: &Product) -> DomNode {
    let id = product.id.to_string();
    DomNode::elem("article")
        .key(&format!("card-{id}"))
        .attr("class", "card")
        .child(
            DomNode::elem("img")
                .attr("src", &product.img)
                .attr("alt", &product.name)
                .attr("class", "product-img"),
        )
        .child(DomNode::text("h3", &product.name))
        .child(
            DomNode::text("p", &format!("S/ {}", format_price(product.price)))
                .attr("class", "price"),
        )
        .child(
            DomNode::text("p", &format!("Type: {}", product.kind.tag())).attr("class", "meta"),
        )
        .child(
            DomNode::elem("div")
                .attr("class", "controls")
                .child(
                    DomNode::text("button", "Add")
                        .attr("class", "add-btn")
                        .attr("data-id", &id)
                        .event("click", "add_to_cart"),
                )
                .child(
                    DomNode::text("button", "Info")
                        .attr("class", "info-btn")
                        .attr("data-id", &id)
                        .event("click", "show_info"),
                ),
        )
}

fn cart_panel(state: &AppState) -> DomNode {
    let mut panel = DomNode::elem("aside")
        .key("cart-panel")
        .attr("class", "cart-panel");
    if !state.cart_open {
        panel = panel.attr("hidden", "hidden");
    }

    // Unresolvable lines are skipped here; pricing already counts them as 0.
    let rows = state.cart.lines().filter_map(|(id, qty)| {
        state.catalog.get(id).map(|p| cart_row(p, qty))
    });
    let list = DomNode::elem("ul")
        .key("cart-list")
        .attr("class", "cart-list")
        .children(rows);

    let total = format_price(cart_total(&state.cart, &state.catalog));

    let checkout = match state.checkout {
        CheckoutPhase::Idle => DomNode::text("button", "Checkout")
            .key("checkout")
            .attr("class", "checkout-btn")
            .event("click", "checkout"),
        CheckoutPhase::Processing => DomNode::text("button", "Processing...")
            .key("checkout")
            .attr("class", "checkout-btn")
            .attr("disabled", "disabled"),
    };

    panel
        .child(list)
        .child(
            DomNode::text("p", &format!("Total: S/ {total}"))
                .key("cart-total")
                .attr("class", "cart-total"),
        )
        .child(
            DomNode::text("button", "Clear")
                .key("clear-cart")
                .attr("class", "clear-btn")
                .attr("data-confirm", CONFIRM_CLEAR)
                .event("click", "clear_cart"),
        )
        .child(checkout)
}

fn cart_row(product: &Product, qty: u32) -> DomNode {
    DomNode::elem("li")
        .key(&format!("line-{}", product.id))
        .child(DomNode::text(
            "span",
            &format!(
                "{} x {} - S/ {}",
                product.name,
                qty,
                format_price(line_total(product, qty))
            ),
        ))
        .child(
            DomNode::text("button", "Remove")
                .attr("data-id", &product.id.to_string())
                .event("click", "remove_from_cart"),
        )
}

fn toast(text: &str) -> DomNode {
    DomNode::text("div", text).key("toast").attr("class", "toast")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(root: &'a DomNode, key: &str) -> Option<&'a DomNode> {
        root.find(&|n| n.key.as_deref() == Some(key))
    }

    #[test]
    fn cards_carry_data_id_controls() {
        let state = AppState::new();
        let snap = snapshot(&state);
        let card = find(&snap.root, "card-1").expect("card for product 1");
        let add = card
            .find(&|n| n.get_event("click") == Some("add_to_cart"))
            .expect("add button");
        assert_eq!(add.get_attr("data-id"), Some("1"));
        let info = card
            .find(&|n| n.get_event("click") == Some("show_info"))
            .expect("info button");
        assert_eq!(info.get_attr("data-id"), Some("1"));
    }

    #[test]
    fn badge_equals_quantity_sum() {
        let mut state = AppState::new();
        state.cart.add(1, 2);
        state.cart.add(4, 3);
        let snap = snapshot(&state);
        let badge = find(&snap.root, "cart-count").expect("badge");
        assert_eq!(badge.text.as_deref(), Some("5"));
    }

    #[test]
    fn cart_rows_and_total_match_pricing() {
        let mut state = AppState::new();
        state.cart.add(1, 2); // 79.90 each
        state.cart_open = true;
        let snap = snapshot(&state);

        let list = find(&snap.root, "cart-list").expect("list");
        assert_eq!(list.children_iter().len(), 1);
        let row_text = list.children_iter()[0].children_iter()[0]
            .text
            .as_deref()
            .unwrap();
        assert_eq!(row_text, "Auriculares BT x 2 - S/ 159.80");

        let total = find(&snap.root, "cart-total").expect("total");
        assert_eq!(total.text.as_deref(), Some("Total: S/ 159.80"));
    }

    #[test]
    fn empty_cart_renders_zero_total() {
        let state = AppState::new();
        let snap = snapshot(&state);
        let total = find(&snap.root, "cart-total").expect("total");
        assert_eq!(total.text.as_deref(), Some("Total: S/ 0.00"));
    }

    #[test]
    fn panel_hidden_until_toggled() {
        let mut state = AppState::new();
        let snap = snapshot(&state);
        let panel = find(&snap.root, "cart-panel").expect("panel");
        assert_eq!(panel.get_attr("hidden"), Some("hidden"));

        state.cart_open = true;
        let snap = snapshot(&state);
        let panel = find(&snap.root, "cart-panel").expect("panel");
        assert_eq!(panel.get_attr("hidden"), None);
    }

    #[test]
    fn filtered_grid_renders_subsequence() {
        let mut state = AppState::new();
        state.query = "monitor".to_string();
        let snap = snapshot(&state);
        let grid = find(&snap.root, "products").expect("grid");
        assert_eq!(grid.children_iter().len(), 1);

        state.query = "zzzz".to_string();
        let snap = snapshot(&state);
        let grid = find(&snap.root, "products").expect("grid");
        assert!(grid.children_iter().is_empty());
    }

    #[test]
    fn processing_disables_checkout_control() {
        let mut state = AppState::new();
        state.checkout = CheckoutPhase::Processing;
        let snap = snapshot(&state);
        let btn = find(&snap.root, "checkout").expect("checkout button");
        assert_eq!(btn.get_attr("disabled"), Some("disabled"));
        assert_eq!(btn.text.as_deref(), Some("Processing..."));
        assert_eq!(btn.get_event("click"), None);
    }

    #[test]
    fn toast_rendered_only_when_present() {
        let mut state = AppState::new();
        assert!(find(&snapshot(&state).root, "toast").is_none());
        let _ = state.show_toast("Product added to cart");
        let snap = snapshot(&state);
        let toast = find(&snap.root, "toast").expect("toast");
        assert_eq!(toast.text.as_deref(), Some("Product added to cart"));
    }

    #[test]
    fn active_slide_follows_index() {
        let mut state = AppState::new();
        state.slide_index = 2;
        let snap = snapshot(&state);
        let slide = find(&snap.root, "slide-2").expect("slide");
        assert_eq!(slide.class(), Some("slide active"));
        let other = find(&snap.root, "slide-0").expect("slide");
        assert_eq!(other.class(), Some("slide"));
    }
}

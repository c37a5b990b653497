//! storefront-core — catalog, cart, pricing, reducer, and snapshot view.
//!
//! The flow is: parse action bytes, reduce against `AppState`, re-render the
//! full DOM snapshot. Mutation and re-render happen in the same `process`
//! call, so no caller ever observes an intermediate state.

pub mod action;
pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod state;
pub mod view;

use std::time::Duration;

pub use action::{parse_action, Action};
pub use cart::Cart;
pub use catalog::{Catalog, Product, ProductKind};
pub use state::{AppState, CheckoutPhase, CHECKOUT_DELAY, SLIDE_COUNT, SLIDE_INTERVAL, TOAST_DELAY};

pub const MSG_ADDED: &str = "Product added to cart";
pub const MSG_CART_EMPTY: &str = "Cart is empty";
pub const MSG_CHECKOUT_DONE: &str = "Payment simulated: purchase complete!";

/// Delayed follow-ups the runtime must schedule after a reduce.
///
/// Neither effect is ever canceled; a stale `DismissToast` is filtered by
/// its generation inside the reducer instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CompleteCheckout { delay: Duration },
    DismissToast { gen: u64, delay: Duration },
}

/// Reducer: mutate state based on action, returning the effects to schedule.
pub fn reduce(state: &mut AppState, action: Action) -> Vec<Effect> {
    let mut effects = Vec::new();
    match action {
        Action::AddToCart { id, qty } => {
            state.cart.add(id, qty);
            effects.push(state.show_toast(MSG_ADDED));
        }
        Action::RemoveFromCart { id } => state.cart.remove(id),
        Action::ClearCart => state.cart.clear(),
        Action::ToggleCart => state.cart_open = !state.cart_open,
        Action::Search { query } => state.query = query.trim().to_lowercase(),
        Action::ShowInfo { id } => {
            // Ids are internally generated; a miss here is a programmer error.
            let label = state
                .catalog
                .get(id)
                .expect("info requested for product missing from catalog")
                .label();
            effects.push(state.show_toast(label));
        }
        Action::FocusSearch => state.focus_gen += 1,
        Action::Checkout => {
            if state.cart.is_empty() {
                effects.push(state.show_toast(MSG_CART_EMPTY));
            } else if state.checkout == CheckoutPhase::Idle {
                state.checkout = CheckoutPhase::Processing;
                effects.push(Effect::CompleteCheckout {
                    delay: CHECKOUT_DELAY,
                });
            }
        }
        Action::CheckoutComplete => {
            state.cart.clear();
            state.checkout = CheckoutPhase::Idle;
            effects.push(state.show_toast(MSG_CHECKOUT_DONE));
        }
        Action::DismissToast { gen } => {
            if gen == state.toast_gen {
                state.toast = None;
            }
        }
        Action::AdvanceSlide => state.slide_index = (state.slide_index + 1) % SLIDE_COUNT,
        Action::Unknown => {}
    }
    effects
}

/// Render the current state to the JSON DOM snapshot.
pub fn render(state: &AppState) -> String {
    view::snapshot(state)
        .to_json()
        .expect("DomNode trees always serialize")
}

/// Parse action bytes and dispatch reduce + render.
pub fn process(state: &mut AppState, input: &[u8]) -> (String, Vec<Effect>) {
    let action = parse_action(input);
    let effects = reduce(state, action);
    (render(state), effects)
}

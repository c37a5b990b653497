use std::time::Duration;

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::Effect;

/// Simulated payment delay.
pub const CHECKOUT_DELAY: Duration = Duration::from_millis(1500);
/// Toast auto-dismiss delay.
pub const TOAST_DELAY: Duration = Duration::from_millis(1200);
/// Hero slideshow advance interval.
pub const SLIDE_INTERVAL: Duration = Duration::from_secs(3);
/// Number of hero slides.
pub const SLIDE_COUNT: usize = 3;

/// Checkout control state machine. `Processing` always returns to `Idle`
/// via the completion timer; there is no cancellation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    Processing,
}

/// Whole-application state: immutable catalog plus everything user actions
/// mutate. The view is a pure function of this struct.
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub cart: Cart,
    /// Trimmed, lower-cased search query. Empty means "show everything".
    pub query: String,
    pub cart_open: bool,
    pub checkout: CheckoutPhase,
    /// Transient message; at most one visible at a time.
    pub toast: Option<String>,
    /// Bumped on every new toast so a stale dismissal timer is ignored.
    pub toast_gen: u64,
    /// Bumped when the search field should grab focus.
    pub focus_gen: u64,
    pub slide_index: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::seed(),
            cart: Cart::new(),
            query: String::new(),
            cart_open: false,
            checkout: CheckoutPhase::Idle,
            toast: None,
            toast_gen: 0,
            focus_gen: 0,
            slide_index: 0,
        }
    }

    /// Show a transient message, replacing any visible one (last message
    /// wins). Returns the dismissal effect the runtime must schedule.
    pub fn show_toast(&mut self, text: impl Into<String>) -> Effect {
        self.toast_gen += 1;
        self.toast = Some(text.into());
        Effect::DismissToast {
            gen: self.toast_gen,
            delay: TOAST_DELAY,
        }
    }

    /// Products matching the current query, in catalog order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog
            .filter(|p| p.name.to_lowercase().contains(&self.query))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

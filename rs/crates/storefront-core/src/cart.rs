use std::collections::BTreeMap;

/// The mutable mapping of selected product quantities for the session.
///
/// Keyed by product id; a zero or removed quantity means the line does not
/// exist. `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Default)]
pub struct Cart {
    lines: BTreeMap<u32, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the stored quantity for `id` by `qty`, creating the line if
    /// absent. Adds are cumulative; a zero qty is a no-op so the
    /// no-zero-quantity-lines invariant holds.
    pub fn add(&mut self, id: u32, qty: u32) {
        if qty == 0 {
            return;
        }
        *self.lines.entry(id).or_insert(0) += qty;
    }

    /// Delete the line for `id`. No-op if absent.
    pub fn remove(&mut self, id: u32) {
        self.lines.remove(&id);
    }

    /// Empty the cart entirely.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Count of distinct product lines (gates checkout).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stored quantity for `id`, 0 if the line does not exist.
    pub fn quantity(&self, id: u32) -> u32 {
        self.lines.get(&id).copied().unwrap_or(0)
    }

    /// Sum of quantities across all lines (the count badge).
    pub fn total_items(&self) -> u32 {
        self.lines.values().sum()
    }

    /// Iterate (product id, quantity) pairs in id order.
    pub fn lines(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.lines.iter().map(|(&id, &qty)| (id, qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_are_cumulative() {
        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(1, 1);
        cart.add(1, 4);
        assert_eq!(cart.quantity(1), 7);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn remove_then_add_leaves_no_residue() {
        let mut cart = Cart::new();
        cart.add(2, 5);
        cart.remove(2);
        cart.add(2, 3);
        assert_eq!(cart.quantity(2), 3);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(1, 1);
        cart.remove(99);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn zero_qty_add_creates_no_line() {
        let mut cart = Cart::new();
        cart.add(1, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.quantity(1), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(2, 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn badge_counts_quantities_not_lines() {
        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(2, 1);
        cart.add(1, 1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.len(), 2);
    }
}

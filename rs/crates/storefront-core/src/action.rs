use serde::Deserialize;

/// Supported actions.
///
/// Wire format: `{"action":"name","payload":{...}}`. Anything that fails to
/// parse or names an unknown action becomes `Unknown`, which reduces to a
/// no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddToCart { id: u32, qty: u32 },
    RemoveFromCart { id: u32 },
    ClearCart,
    ToggleCart,
    Search { query: String },
    ShowInfo { id: u32 },
    FocusSearch,
    Checkout,
    /// Internal: fired by the checkout timer.
    CheckoutComplete,
    /// Internal: fired by the toast dismissal timer.
    DismissToast { gen: u64 },
    /// Internal: fired by the slideshow ticker.
    AdvanceSlide,
    Unknown,
}

#[derive(Deserialize)]
struct Envelope {
    action: String,
    #[serde(default)]
    payload: Payload,
}

#[derive(Deserialize, Default)]
struct Payload {
    id: Option<NumOrStr>,
    qty: Option<u32>,
    query: Option<String>,
    gen: Option<u64>,
}

/// `data-id` attributes arrive as strings from the DOM; programmatic callers
/// send numbers. Accept both, like the original `Number()` coercion.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(u32),
    Str(String),
}

impl NumOrStr {
    fn to_u32(&self) -> Option<u32> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

/// Parse raw action bytes into an `Action`.
pub fn parse_action(input: &[u8]) -> Action {
    let env: Envelope = match serde_json::from_slice(input) {
        Ok(e) => e,
        Err(_) => return Action::Unknown,
    };
    let id = env.payload.id.as_ref().and_then(NumOrStr::to_u32);

    match env.action.as_str() {
        "add_to_cart" => match id {
            Some(id) => Action::AddToCart {
                id,
                qty: env.payload.qty.unwrap_or(1),
            },
            None => Action::Unknown,
        },
        "remove_from_cart" => match id {
            Some(id) => Action::RemoveFromCart { id },
            None => Action::Unknown,
        },
        "show_info" => match id {
            Some(id) => Action::ShowInfo { id },
            None => Action::Unknown,
        },
        "clear_cart" => Action::ClearCart,
        "toggle_cart" => Action::ToggleCart,
        "search" => Action::Search {
            query: env.payload.query.unwrap_or_default(),
        },
        "focus_search" => Action::FocusSearch,
        "checkout" => Action::Checkout,
        "checkout_complete" => Action::CheckoutComplete,
        "dismiss_toast" => Action::DismissToast {
            gen: env.payload.gen.unwrap_or(0),
        },
        "advance_slide" => Action::AdvanceSlide,
        _ => Action::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_string_id() {
        let action = parse_action(br#"{"action":"add_to_cart","payload":{"id":"4"}}"#);
        assert_eq!(action, Action::AddToCart { id: 4, qty: 1 });
    }

    #[test]
    fn parses_add_with_numeric_id_and_qty() {
        let action = parse_action(br#"{"action":"add_to_cart","payload":{"id":2,"qty":3}}"#);
        assert_eq!(action, Action::AddToCart { id: 2, qty: 3 });
    }

    #[test]
    fn parses_search_query() {
        let action = parse_action(br#"{"action":"search","payload":{"query":"Teclado"}}"#);
        assert_eq!(
            action,
            Action::Search {
                query: "Teclado".to_string()
            }
        );
    }

    #[test]
    fn parses_payload_free_actions() {
        assert_eq!(parse_action(br#"{"action":"checkout"}"#), Action::Checkout);
        assert_eq!(parse_action(br#"{"action":"clear_cart"}"#), Action::ClearCart);
        assert_eq!(
            parse_action(br#"{"action":"dismiss_toast","payload":{"gen":7}}"#),
            Action::DismissToast { gen: 7 }
        );
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(parse_action(b"not json"), Action::Unknown);
        assert_eq!(parse_action(br#"{"action":"warp_drive"}"#), Action::Unknown);
        assert_eq!(
            parse_action(br#"{"action":"add_to_cart","payload":{"id":"banana"}}"#),
            Action::Unknown
        );
    }
}

//! storefront-render-html — Render Storefront DomNode trees to HTML strings
//!
//! Produces SSR-ready HTML with data-key and data-a_ attributes so the client
//! runtime can hydrate event delegation on first paint.

use storefront_dom::DomNode;

/// Void elements that must not have closing tags
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Render a DomNode tree to an HTML string.
pub fn render_to_html(node: &DomNode) -> String {
    let mut buf = String::with_capacity(4096);
    write_node(node, &mut buf);
    buf
}

fn write_node(node: &DomNode, buf: &mut String) {
    let is_void = VOID_ELEMENTS.contains(&node.tag.as_str());

    buf.push('<');
    buf.push_str(&node.tag);

    // data-key attribute
    if let Some(key) = &node.key {
        buf.push_str(" data-key=\"");
        buf.push_str(&escape_attr(key));
        buf.push('"');
    }

    // HTML attributes (BTreeMap iteration is already sorted → deterministic)
    if let Some(attrs) = &node.attrs {
        for (k, v) in attrs {
            buf.push(' ');
            buf.push_str(k);
            buf.push_str("=\"");
            buf.push_str(&escape_attr(v));
            buf.push('"');
        }
    }

    // Event attributes → data-a_ prefix
    if let Some(events) = &node.events {
        for (k, v) in events {
            buf.push_str(" data-a_");
            buf.push_str(k);
            buf.push_str("=\"");
            buf.push_str(&escape_attr(v));
            buf.push('"');
        }
    }

    buf.push('>');

    // Text content
    if let Some(text) = &node.text {
        buf.push_str(&escape_html(text));
    }

    // Children
    for child in node.children_iter() {
        write_node(child, buf);
    }

    // Closing tag (skip for void elements)
    if !is_void {
        buf.push_str("</");
        buf.push_str(&node.tag);
        buf.push('>');
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

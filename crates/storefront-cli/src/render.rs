// Plain-text output for the terminal
use storefront_core::{MenuNavigator, ProductCard};

/// One line per visible entry, `>` for entries that open a submenu
pub fn render_menu(menu: &MenuNavigator) -> String {
    let mut out = String::new();

    if menu.is_root() {
        out.push_str("Menu\n");
    } else if let Some(current) = menu.current() {
        out.push_str(&format!("< {}\n", current.name));
        out.push_str(&format!(
            "  [SHOW {}]  (id {})\n",
            current.name.to_uppercase(),
            current.id
        ));
    }

    let items = menu.current_items();
    if items.is_empty() {
        out.push_str("  (no categories)\n");
    }
    for category in items {
        let marker = if category.has_children { " >" } else { "" };
        out.push_str(&format!("  {}{}  (id {})\n", category.name, marker, category.id));
    }

    out
}

/// Listing title line (category name when known) and the result count
pub fn render_listing_header(title: Option<&str>, result_count: usize) -> String {
    match title.filter(|t| !t.is_empty()) {
        Some(title) => format!("{}\n{} results\n", title, result_count),
        None => format!("{} results\n", result_count),
    }
}

pub fn render_card(card: &ProductCard) -> String {
    let badge = if card.is_new { " [New]" } else { "" };
    let mut out = format!("{}{}\n", card.name, badge);

    if card.has_tiers() {
        for tier in &card.tiers {
            out.push_str(&format!("  From {:<5} {}", tier.from, tier.unit_price));
            if let Some(ref list) = tier.list_price {
                out.push_str(&format!("  (was {})", list));
            }
            out.push('\n');
        }
    } else if let Some(ref price) = card.price {
        out.push_str(&format!("  {}", price));
        if let Some(ref list) = card.list_price {
            out.push_str(&format!("  (was {})", list));
        }
        if let Some(ref label) = card.discount_label {
            out.push_str(&format!("  {}", label));
        }
        out.push('\n');
    }

    if let Some(ref url) = card.cover_url {
        out.push_str(&format!("  {}\n", url));
    }

    out
}

/// Hide all but the last four characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

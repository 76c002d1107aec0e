//! Static category catalog for expense and income transactions.

use shared::{Category, Direction};

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    background_color: &'static str,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
    background_color: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        icon,
        color,
        background_color,
    }
}

const EXPENSE_CATEGORIES: &[CatalogEntry] = &[
    entry("food", "Diet", "hamburger", "#FBC02D", "#FFF8E1"),
    entry("daily", "Daily", "coffee", "#8D6E63", "#D7CCC8"),
    entry("transport", "Transport", "bus", "#5C6BC0", "#E8EAF6"),
    entry("social", "Social", "glass-wine", "#EC407A", "#FCE4EC"),
    entry("home", "Residents", "home", "#78909C", "#ECEFF1"),
    entry("gift", "Gift", "gift", "#AB47BC", "#F3E5F5"),
    entry("comm", "Communication", "phone", "#42A5F5", "#E3F2FD"),
    entry("clothes", "Clothes", "tshirt-crew", "#26A69A", "#E0F2F1"),
    entry("ent", "Entertainment", "movie", "#EF5350", "#FFEBEE"),
    entry("beauty", "Beauty", "lipstick", "#FFA726", "#FFF3E0"),
    entry("health", "Medical", "medical-bag", "#66BB6A", "#E8F5E9"),
    entry("tax", "Tax", "cash", "#8D6E63", "#EFEBE9"),
];

const INCOME_CATEGORIES: &[CatalogEntry] = &[
    entry("salary", "Salary", "cash-multiple", "#66BB6A", "#E8F5E9"),
    entry("bonus", "Bonus", "sack", "#FFA726", "#FFF3E0"),
    entry("invest", "Investment", "finance", "#29B6F6", "#E1F5FE"),
    entry("parttime", "Part-time", "laptop", "#7E57C2", "#EDE7F6"),
];

fn entries(direction: Direction) -> &'static [CatalogEntry] {
    match direction {
        Direction::Expense => EXPENSE_CATEGORIES,
        Direction::Income => INCOME_CATEGORIES,
    }
}

fn to_category(entry: &CatalogEntry, direction: Direction) -> Category {
    Category {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        icon: entry.icon.to_string(),
        color: entry.color.to_string(),
        background_color: entry.background_color.to_string(),
        direction,
    }
}

/// All categories of a direction, in display order
pub fn categories(direction: Direction) -> Vec<Category> {
    entries(direction)
        .iter()
        .map(|entry| to_category(entry, direction))
        .collect()
}

/// Category preselected when the add screen switches to a direction
pub fn default_category(direction: Direction) -> &'static str {
    match direction {
        Direction::Expense => "food",
        Direction::Income => "salary",
    }
}

/// Look up a category of a given direction
pub fn find(direction: Direction, id: &str) -> Option<Category> {
    entries(direction)
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| to_category(entry, direction))
}

/// Look up a category in either catalog, expense first
pub fn find_any(id: &str) -> Option<Category> {
    find(Direction::Expense, id).or_else(|| find(Direction::Income, id))
}

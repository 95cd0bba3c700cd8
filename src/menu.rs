//! Top-level menu choices for the interactive harvester

use std::fmt;

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Storefront,
    Search,
    Genre,
    Exit,
}

impl MenuChoice {
    /// Entries in display order; position + 1 is the number the user types
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Storefront,
        MenuChoice::Search,
        MenuChoice::Genre,
        MenuChoice::Exit,
    ];

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            MenuChoice::Storefront => "Extract links from the storefront",
            MenuChoice::Search => "Search by keyword (blank for random)",
            MenuChoice::Genre => "Browse by genre",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Map raw menu input to a choice. Anything other than `1`-`4` is `None`.
#[must_use]
pub fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Storefront),
        "2" => Some(MenuChoice::Search),
        "3" => Some(MenuChoice::Genre),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

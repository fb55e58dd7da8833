//! Legend colours for categories and platforms.
//!
//! Keys are matched exactly; anything not in a table gets `DEFAULT_COLOR`.

/// Colour for keys without a legend entry.
pub const DEFAULT_COLOR: &str = "#0891b2";

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Web", "#38bdf8"),
    ("Crypto", "#a78bfa"),
    ("Pwn", "#f87171"),
    ("Reverse", "#fb923c"),
    ("Forensics", "#34d399"),
    ("OSINT", "#facc15"),
    ("Misc", "#94a3b8"),
];

const PLATFORM_COLORS: &[(&str, &str)] = &[
    ("HackTheBox", "#9fef00"),
    ("TryHackMe", "#e11d48"),
    ("picoCTF", "#f59e0b"),
    ("OverTheWire", "#60a5fa"),
    ("CTFtime", "#e879f9"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> &'static str {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

pub fn category_color(category: &str) -> &'static str {
    lookup(CATEGORY_COLORS, category)
}

pub fn platform_color(platform: &str) -> &'static str {
    lookup(PLATFORM_COLORS, platform)
}

use figschema_common::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic color tokens of the design system, in lookup order
const DESIGN_SYSTEM_TOKENS: &[(&str, &str)] = &[
    // Base
    ("White", "#FFFFFF"),
    ("Black", "#000000"),
    // Gray scale
    ("Gray-950", "#0C111D"),
    ("Gray-800", "#182230"),
    ("Gray-400", "#98A2B3"),
    ("Gray-300", "#CFD4DE"),
    ("Gray-200", "#E0E3EB"),
    ("Gray-100", "#EDEFF4"),
    ("Gray-50", "#F5F6FA"),
    ("Gray-25", "#F9FAFD"),
    // Semantic
    ("Primary", "#101828"),
    ("Secondary", "#344054"),
    ("Tertiary", "#475467"),
    ("Quaternary", "#667085"),
    // Brand
    ("Brand-Primary", "#371b97"),
    ("Brand-Secondary", "#4e26db"),
    ("Brand-Tertiary", "#5c37eb"),
    ("Brand-950", "#211059"),
    ("Brand-800", "#421fb8"),
    ("Brand-500", "#705af8"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorToken {
    pub name: String,
    pub hex_value: String,
}

#[derive(Deserialize)]
struct TokenEntry {
    value: String,
}

/// Immutable name -> color table with reverse lookups.
///
/// Reverse lookups return the first match in table order, so a table with
/// duplicate hex values always resolves to the earliest name.
#[derive(Debug, Clone)]
pub struct ColorTable {
    tokens: IndexMap<String, ColorToken>,
}

impl ColorTable {
    /// The built-in design system table
    pub fn design_system() -> Self {
        Self::from_tokens(
            DESIGN_SYSTEM_TOKENS
                .iter()
                .map(|(name, hex)| (name.to_string(), hex.to_string())),
        )
    }

    pub fn from_tokens(tokens: impl IntoIterator<Item = (String, String)>) -> Self {
        let tokens = tokens
            .into_iter()
            .map(|(name, hex_value)| {
                (
                    name.clone(),
                    ColorToken {
                        name,
                        hex_value,
                    },
                )
            })
            .collect();
        Self { tokens }
    }

    /// Load a table from `{ "<name>": { "value": "#rrggbb" } }`, keeping file order
    pub fn from_json_str(input: &str) -> Result<Self> {
        let entries: IndexMap<String, TokenEntry> = serde_json::from_str(input)?;
        Ok(Self::from_tokens(
            entries.into_iter().map(|(name, entry)| (name, entry.value)),
        ))
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&ColorToken> {
        self.tokens.get(name)
    }

    /// Case-insensitive exact match on the hex value
    pub fn lookup_by_hex(&self, hex: &str) -> Option<&str> {
        self.tokens
            .values()
            .find(|t| t.hex_value.eq_ignore_ascii_case(hex))
            .map(|t| t.name.as_str())
    }

    /// Match a normalized RGB triple; no tolerance, a one-unit miss is a miss
    pub fn lookup_by_rgb(&self, r: f64, g: f64, b: f64) -> Option<&str> {
        self.lookup_by_hex(&rgb_to_hex(r, g, b))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &ColorToken> {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::design_system()
    }
}

/// Scale a `[0, 1]` channel to 8 bits
pub fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        channel_to_u8(r),
        channel_to_u8(g),
        channel_to_u8(b)
    )
}

/// Literal `rgb(R,G,B)` form used when no token matches
pub fn rgb_literal(r: f64, g: f64, b: f64) -> String {
    format!(
        "rgb({},{},{})",
        channel_to_u8(r),
        channel_to_u8(g),
        channel_to_u8(b)
    )
}

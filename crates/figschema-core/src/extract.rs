use crate::color::{rgb_literal, ColorTable};
use crate::node::{DesignNode, Rgba};
use serde::{Deserialize, Serialize};

pub const TEXT_GROUP_NAME: &str = "Text and supporting text";
pub const LABEL_NODE_NAME: &str = "Text";
pub const DESCRIPTION_NODE_NAME: &str = "Supporting text";

const MEDIUM_FONT_WEIGHT: f64 = 500.0;

/// Which text slot a node fills; drives the fallback size and color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Label,
    Description,
}

impl TextRole {
    pub fn default_size(&self) -> &'static str {
        match self {
            TextRole::Label => "sm",
            TextRole::Description => "xs",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            TextRole::Label => "Secondary",
            TextRole::Description => "Tertiary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub variant: String,
    pub weight: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub label: TextContent,
    pub description: TextContent,
}

/// Pulls label/description text out of a named text group under a node
pub struct TextExtractor<'a> {
    colors: &'a ColorTable,
}

impl<'a> TextExtractor<'a> {
    pub fn new(colors: &'a ColorTable) -> Self {
        Self { colors }
    }

    /// Extract label and description.
    ///
    /// Without a text group the result is entirely empty, styles included. With a
    /// group, missing slots still get their role defaults.
    pub fn extract(&self, root: &DesignNode) -> ExtractedContent {
        let Some(group) = root.find_child(TEXT_GROUP_NAME) else {
            return ExtractedContent::default();
        };

        ExtractedContent {
            label: self.extract_slot(group.find_child(LABEL_NODE_NAME), TextRole::Label),
            description: self.extract_slot(
                group.find_child(DESCRIPTION_NODE_NAME),
                TextRole::Description,
            ),
        }
    }

    fn extract_slot(&self, node: Option<&DesignNode>, role: TextRole) -> TextContent {
        let style = node.and_then(|n| n.style.as_ref());

        let size = style
            .and_then(|s| s.font_size)
            .filter(|s| *s != 0.0 && !s.is_nan())
            .map(|s| s.to_string())
            .unwrap_or_else(|| role.default_size().to_string());

        let weight = match style.and_then(|s| s.font_weight) {
            Some(w) if w == MEDIUM_FONT_WEIGHT => "medium",
            _ => "regular",
        };

        let color = node
            .and_then(DesignNode::first_fill_color)
            .map(|c| resolve_color(self.colors, c))
            .unwrap_or_else(|| role.default_color().to_string());

        TextContent {
            text: node
                .and_then(|n| n.characters.clone())
                .unwrap_or_default(),
            style: TextStyle {
                variant: format!("text-{}", size),
                weight: weight.to_string(),
                color,
            },
        }
    }
}

/// Token name for a color, or its literal `rgb(..)` form when no token matches
pub fn resolve_color(colors: &ColorTable, color: &Rgba) -> String {
    colors
        .lookup_by_rgb(color.r, color.g, color.b)
        .map(String::from)
        .unwrap_or_else(|| rgb_literal(color.r, color.g, color.b))
}

use crate::ids::IdSource;
use crate::schema::{OutputSchema, SchemaProjector};
use crate::style_map::{map_node_styles, AppearanceStyles};
use figschema_common::ComponentKind;
use figschema_core::{DesignNode, SourceDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const AVATAR_GROUP_NAME: &str = "Avatar group";
const AVATARS_FRAME_NAME: &str = "Avatars";
const AVATAR_NODE_NAME: &str = "Avatar";

/// Avatars at or past this index are emitted as overflow placeholders
pub const VISIBLE_AVATAR_LIMIT: usize = 5;
pub const OVERFLOW_BLOCK_PLACEHOLDER: &str = "__PLACEHOLDER__";

const DEFAULT_MAX_VISIBLE: u64 = 3;
const DEFAULT_SIZE: &str = "sm";
const ITEM_TYPE: &str = "icon";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarGroupComponent {
    pub component_type: String,
    pub appearance: AvatarGroupAppearance,
    pub content: AvatarGroupContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarGroupAppearance {
    pub max_visible_avatars: u64,
    pub size: String,
    pub styles: AppearanceStyles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarGroupContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub avatar_group_items: Vec<AvatarGroupItem>,
}

/// One avatar entry. Overflow entries carry a generated id and a block
/// reference the downstream system resolves later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvatarGroupItem {
    #[serde(rename_all = "camelCase")]
    Overflow {
        block_id: String,
        label: String,
        id: String,
        #[serde(rename = "type")]
        item_type: String,
        value: String,
        fallback_text: String,
    },
    #[serde(rename_all = "camelCase")]
    Visible {
        fallback_text: String,
        label: String,
        #[serde(rename = "type")]
        item_type: String,
        value: String,
    },
}

impl AvatarGroupItem {
    pub fn fallback_text(&self) -> &str {
        match self {
            AvatarGroupItem::Overflow { fallback_text, .. }
            | AvatarGroupItem::Visible { fallback_text, .. } => fallback_text,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            AvatarGroupItem::Overflow { value, .. } | AvatarGroupItem::Visible { value, .. } => {
                value
            }
        }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, AvatarGroupItem::Overflow { .. })
    }
}

pub type AvatarGroupSchema = OutputSchema<AvatarGroupComponent>;

/// Projects `INSTANCE` nodes named `Avatar group`
pub struct AvatarGroupProjector<I: IdSource> {
    ids: I,
}

impl<I: IdSource> AvatarGroupProjector<I> {
    pub fn new(ids: I) -> Self {
        Self { ids }
    }

    pub fn into_ids(self) -> I {
        self.ids
    }

    fn avatar_item(&mut self, avatar: &DesignNode, idx: usize, doc: &SourceDocument) -> AvatarGroupItem {
        let fallback_text =
            avatar_style_name(avatar, doc).unwrap_or_else(|| format!("Avatar {}", idx + 1));

        if idx >= VISIBLE_AVATAR_LIMIT {
            let id = self.ids.next_id();
            return AvatarGroupItem::Overflow {
                block_id: OVERFLOW_BLOCK_PLACEHOLDER.to_string(),
                label: fallback_text.clone(),
                id: id.clone(),
                item_type: ITEM_TYPE.to_string(),
                value: id,
                fallback_text,
            };
        }

        AvatarGroupItem::Visible {
            label: fallback_text.clone(),
            item_type: ITEM_TYPE.to_string(),
            value: normalize_value(&fallback_text),
            fallback_text,
        }
    }
}

/// `avatar` followed by the ASCII letters and digits of `name`
pub fn normalize_value(name: &str) -> String {
    let mut value = String::from("avatar");
    value.extend(name.chars().filter(char::is_ascii_alphanumeric));
    value
}

/// Last `/`-separated segment of a style name, e.g. `Avatar user square/Andi Lane` -> `Andi Lane`
pub fn name_from_style(style_name: &str) -> &str {
    style_name.rsplit('/').next().unwrap_or(style_name).trim()
}

/// Display name recovered from the avatar's fill style, via `styles.fill` first
/// and then any fill paint's `styleId`
fn avatar_style_name(avatar: &DesignNode, doc: &SourceDocument) -> Option<String> {
    let resolve = |style_id: &str| {
        doc.style_name(style_id)
            .map(name_from_style)
            .filter(|n| !n.is_empty())
            .map(String::from)
    };

    avatar
        .styles
        .get("fill")
        .and_then(|id| resolve(id.as_str()))
        .or_else(|| {
            avatar
                .fills
                .iter()
                .filter_map(|f| f.style_id.as_deref())
                .find_map(|id| resolve(id))
        })
}

/// Accepts numbers and numeric strings; zero or anything else falls back to the default
fn max_visible_avatars(value: Option<&Value>) -> u64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|n| *n > 0).unwrap_or(DEFAULT_MAX_VISIBLE)
}

impl<I: IdSource> SchemaProjector for AvatarGroupProjector<I> {
    type Component = AvatarGroupComponent;

    fn kind(&self) -> ComponentKind {
        ComponentKind::AvatarGroup
    }

    fn matches(&self, node: &DesignNode) -> bool {
        node.is_instance() && node.name.as_deref() == Some(AVATAR_GROUP_NAME)
    }

    fn project_node(&mut self, id: &str, node: &DesignNode, doc: &SourceDocument) -> AvatarGroupSchema {
        let avatars: Vec<&DesignNode> = node
            .find_child(AVATARS_FRAME_NAME)
            .map(|frame| frame.children_named(AVATAR_NODE_NAME).collect())
            .unwrap_or_default();
        debug!("Avatar group {} has {} avatar(s)", id, avatars.len());

        let items = avatars
            .into_iter()
            .enumerate()
            .map(|(idx, avatar)| self.avatar_item(avatar, idx, doc))
            .collect();

        let display_name = match node.name.as_deref() {
            // Whitespace becomes `_` rather than being dropped: "Avatar group" -> "Avatar_group"
            Some(name) if !name.is_empty() => name
                .chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect(),
            _ => format!("AvatarGroup_{}", id),
        };

        let component = AvatarGroupComponent {
            component_type: "AvatarGroup".to_string(),
            appearance: AvatarGroupAppearance {
                max_visible_avatars: max_visible_avatars(node.property("maxVisibleAvatars")),
                size: node
                    .property_str("Size")
                    .filter(|s| !s.is_empty())
                    .unwrap_or(DEFAULT_SIZE)
                    .to_string(),
                styles: map_node_styles(node),
            },
            content: AvatarGroupContent {
                content_type: "STATIC".to_string(),
                avatar_group_items: items,
            },
        };

        OutputSchema::new(id.to_string(), display_name, component)
    }
}

pub mod color;
pub mod extract;
pub mod node;

pub use color::{rgb_literal, rgb_to_hex, ColorTable, ColorToken};
pub use extract::{resolve_color, ExtractedContent, TextContent, TextExtractor, TextRole, TextStyle};
pub use node::{
    BoundingBox, ComponentProperty, DesignNode, Effect, Paint, Rgba, SourceDocument, StyleMeta,
    TypeStyle,
};

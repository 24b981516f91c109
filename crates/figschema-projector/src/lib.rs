pub mod avatar_group;
pub mod checkbox;
pub mod ids;
pub mod schema;
pub mod style_map;

pub use avatar_group::{AvatarGroupComponent, AvatarGroupItem, AvatarGroupProjector, AvatarGroupSchema};
pub use checkbox::{CheckboxComponent, CheckboxProjector, CheckboxSchema};
pub use ids::{IdSource, RandomIdSource, SequentialIdSource};
pub use schema::{OutputSchema, SchemaProjector, SchemaSet, Visibility};
pub use style_map::{map_node_styles, AppearanceStyles};

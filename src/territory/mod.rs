//! Territory resource yields
//!
//! A claimed region yields OP each cycle according to its type and size.

pub mod resources;
pub mod types;

pub use resources::{calculate_resources, calculate_resources_by_key, territory_income};
pub use types::{SizeClass, Territory, TerritoryType};

//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for card definitions
//! - `CardType`: Ingredient / Spice / Tool / Technique
//! - `CardDefinition`: immutable authored template
//! - `CardInstance`: per-session card with a mutable stat snapshot
//! - `CardRegistry`: definition lookup by ID and by name
//!
//! Definitions are shared, read-only data; every mutation (the spice
//! combine) happens on a `CardInstance` owned by one session.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardType, StatMap};
pub use instance::CardInstance;
pub use registry::CardRegistry;

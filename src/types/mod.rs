// Raindrop search shared type definitions
// Remote entities, derived tree nodes, filter selections, notifications, settings and errors.

pub mod collection;
pub mod errors;
pub mod filter;
pub mod notification;
pub mod raindrop;
pub mod settings;

//! Primitive wrappers for the unified API.
//!
//! - [`Runs`]: lifecycle, listing, usage and totals (`rp.runs`)
//! - [`Events`]: run timelines (`rp.events`)

mod events;
mod runs;

pub use events::Events;
pub use runs::Runs;

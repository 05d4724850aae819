//! Text-generation boundary for Soulforge.
//!
//! Everything that touches the generation proxy lives here: the wire-shaped
//! request types, the HTTP client behind the [`TextGenerator`] trait, the
//! labeled-field response parser, and the forge workflows that turn a parsed
//! response into stored entities. The rest of the workspace never sees raw
//! generated text.

/// The HTTP client and the generator trait.
pub mod client;
/// Error types for the generation boundary.
pub mod error;
/// Generation workflows that write into a store.
pub mod forge;
/// Labeled-field response parsing.
pub mod parse;
/// Wire-shaped request types.
pub mod request;

/// Re-export client types.
pub use client::{HttpGenerator, TextGenerator};
/// Re-export error types.
pub use error::{GenError, GenResult};
/// Re-export forge workflows.
pub use forge::{
    generate_ability, generate_lair_actions, reroll_ability, AbilityRequest, LairRequest,
};
/// Re-export parsing.
pub use parse::{parse_ability_response, parse_lair_batch, AbilityCardFields};
/// Re-export request types.
pub use request::{ContextSummary, GenerationMode, GenerationRequest, LairTarget};

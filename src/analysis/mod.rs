//! Document analysis: the in-memory document store and the phrase rule
//! that produces diagnostics.

pub mod phrase;
pub mod state;

pub use phrase::{PhraseMatch, PhraseRule};
pub use state::DocumentStore;

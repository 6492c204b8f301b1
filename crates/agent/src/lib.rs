//! Dialogue engine - deterministic sales replies from a transcript and a customer profile
//!
//! This crate wires the pieces from `pitchcraft-core` into one call:
//! - Classifies the latest message into intent signals
//! - Matches catalog items against interests and the latest message
//! - Picks one funnel stage from the fixed-priority rule table
//! - Renders that stage's template (`composer`)
//!
//! # Key Types
//!
//! - `DialogueEngine` - Main entry point (see `runtime` module)
//! - `ResponseComposer` - Stage templates backed by `tera`
//! - `RandomSource` - Injectable source for the scarcity count
//!
//! # Statelessness
//!
//! Nothing is remembered between calls. The stage is re-derived from the full transcript
//! every time, so identical inputs with a fixed random source give identical replies.

pub mod composer;
pub mod random;
pub mod runtime;

pub use composer::{ComposedReply, ComputedValues, ResponseComposer};
pub use random::{FixedRandom, RandomSource, SequenceRandom, ThreadRandom};
pub use runtime::{DialogueEngine, EngineReply};

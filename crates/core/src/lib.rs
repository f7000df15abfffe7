//! # Emoteport Core
//!
//! Domain types, provider traits, and error definitions for Emoteport.
//! This crate has **no HTTP dependencies**; it defines the model that the
//! upstream adapters produce and the aggregator consumes.
//!
//! ## Layout
//!
//! - [`model`]: channel identities, emotes, badges
//! - [`provider`]: the traits every upstream adapter implements
//! - [`error`]: the not-found / upstream error taxonomy

pub mod error;
pub mod model;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result, UpstreamError};
pub use model::{Badge, ChannelCandidate, ChannelId, ChannelIdentity, Emote, EmoteKind};
pub use provider::{BadgeProvider, ChannelDirectory, EmoteProvider, Scope, settle};

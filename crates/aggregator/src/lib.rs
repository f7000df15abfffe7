//! Request-time composition for Emoteport.
//!
//! - [`resolver`] turns usernames into channel identities and runs channel
//!   search.
//! - [`fanout`] queries every emote/badge adapter concurrently and merges
//!   whatever succeeded.
//! - [`service`] is the handler-facing facade the gateway and CLI call.

pub mod fanout;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod testing;

pub use fanout::Aggregator;
pub use resolver::{IdentityResolver, collate_display_names};
pub use service::UserService;

//! Upstream provider adapters for Emoteport.
//!
//! Each adapter implements one or more `emoteport_core` provider traits and
//! owns the response schema of a single third-party API. The registry builds
//! the configured set once at startup.

pub mod bttv;
pub mod ffz;
pub mod http;
pub mod registry;
pub mod seventv;
pub mod twitch;

pub use bttv::BttvProvider;
pub use ffz::FfzProvider;
pub use http::HttpClient;
pub use registry::{ProviderSet, build_from_config};
pub use seventv::SevenTvProvider;
pub use twitch::TwitchProvider;

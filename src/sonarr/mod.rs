//! Client for the Sonarr v3 API
//!
//! Covers the three calls a sweep pass needs: the status query (controller
//! start time), the paged queue listing, and the blacklist-and-remove command
//! for a single queue item.

mod client;
mod models;

pub use client::{Result, SonarrClient, SonarrError};
pub use models::{QueueItem, QueuePage, SystemStatus};

//! # Shuffle Engine
//!
//! Pure, in-memory reordering of a fetched playlist. Nothing in here performs
//! I/O or holds shared state; every function runs to completion inside the
//! caller's request.
//!
//! The pieces compose in this order:
//!
//! ```text
//! Vec<Track> ──► Permutation::random(len) ──► Permutation::apply(&tracks)
//!                                                   │
//!                      filter_playable ◄────────────┘
//!                            │
//!                            ▼
//!              batches(uris, MAX_BATCH_SIZE) ──► one "add items" call per batch
//! ```
//!
//! Only the permutation is kept between requests. Storing a handful of
//! indices is much smaller than storing a second copy of the playlist.

mod batch;
mod filter;
mod permutation;

use thiserror::Error;

pub use batch::{Batches, MAX_BATCH_SIZE, batches};
pub use filter::filter_playable;
pub use permutation::Permutation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

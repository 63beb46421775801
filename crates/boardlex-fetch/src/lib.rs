//! boardlex-fetch
//!
//! Thread sources for the analyzer: the live board API (`client`) and an
//! on-disk snapshot with the same JSON layout (`snapshot`). `collect` turns
//! either into raw documents.
pub mod client;
pub mod collect;
pub mod snapshot;
pub mod wire;

pub use client::ChanClient;
pub use collect::{collect_documents, Collection};
pub use snapshot::SnapshotSource;

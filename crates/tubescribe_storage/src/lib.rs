//! In-memory persistent store implementations for Tubescribe.
//!
//! These back the [`TranscriptStore`](tubescribe_interface::TranscriptStore)
//! and [`ImageStore`](tubescribe_interface::ImageStore) traits with maps
//! indexed by composite key. They behave like the document store the service
//! runs against in production: inserts never deduplicate, and lookups return
//! the earliest record for a key.
//!
//! # Example
//!
//! ```rust
//! use tubescribe_core::{TranscriptEntry, TranscriptKey};
//! use tubescribe_interface::TranscriptStore;
//! use tubescribe_storage::InMemoryTranscriptStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryTranscriptStore::new();
//! let key = TranscriptKey::new("abc".into(), "u1".into());
//!
//! store.insert(&key, &[TranscriptEntry::new("hi", "0:00")]).await?;
//! let record = store.find(&key).await?.expect("stored");
//! assert_eq!(record.entries().len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod images;
mod transcripts;

pub use images::InMemoryImageStore;
pub use transcripts::InMemoryTranscriptStore;

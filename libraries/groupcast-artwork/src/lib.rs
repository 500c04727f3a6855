//! Groupcast Artwork - generated placeholder covers
//!
//! Tracks and contexts without server-provided cover art get a generated
//! image: a background colour and up to two initials, both derived from the
//! label alone. The same label always produces the same bytes, so covers are
//! stable across queue refetches and safe to cache.
//!
//! # Features
//!
//! - Pure, deterministic SVG generation
//! - LRU caching of rendered covers
//! - Base64 data URIs, directly usable as an image source
//!
//! # Example
//!
//! ```
//! use groupcast_artwork::PlaceholderArt;
//!
//! let art = PlaceholderArt::new(64);
//! let uri = art.cover_for("Kind of Blue");
//!
//! assert!(uri.starts_with("data:image/svg+xml;base64,"));
//! assert_eq!(uri, art.cover_for("Kind of Blue"));
//! ```

mod placeholder;
mod types;

// Re-export public API
pub use placeholder::{initials, render, PlaceholderArt, PALETTE};
pub use types::ArtworkData;

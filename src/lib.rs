//! MediaShelf - voice memos and documents, kept locally
//!
//! This crate provides two screens: an audio recorder/player with a
//! searchable clip library, and a document shelf that imports, lists and
//! opens files. Both persist their lists as JSON in a key-value store.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Clips, stored files, the recorder/player state machine, search
//! - **Application**: Screen controllers and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, rfd, JSON files, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

//! Lower-third configuration engine - state, validation, and synchronization
//! for live-stream broadcast overlays.
//!
//! This library exposes the core functionality of the `ltc` CLI for use in
//! tests and potentially other applications.
//!
//! # Modules
//!
//! - `primitives`: Geometry and style value objects
//! - `model`: The nested `LowerThirdConfig` tree and `Profile` aggregate
//! - `codec`: Wire-record encoding/decoding and legacy schema migration
//! - `engine`: Validation, recommendations, and responsive scaling
//! - `history`: Bounded undo/redo over configuration snapshots
//! - `store`: Remote tree-store abstraction with in-memory and file backends
//! - `sync`: The synchronization controller tying live state to the store
//! - `export`: OBS, stylesheet, and companion-app projections
#![forbid(unsafe_code)]

pub mod cli;
pub mod codec;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod model;
pub mod primitives;
pub mod store;
pub mod sync;

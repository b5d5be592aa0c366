//! # Chess System
//!
//! In-memory bookkeeping for chess tournaments: games, per-player records,
//! winner selection and ranking reports.
//!
//! ## Architecture
//!
//! - **map**: Ordered key-value container backing every table
//! - **models**: Core data structures (games, players, tournaments, standings)
//! - **calculate**: Scoring, averaging and ranking functions
//! - **system**: The [`ChessSystem`] orchestrator and its error type
//! - **storage**: Report exports and JSONL files
//! - **replay**: Command scripts applied to a system
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod map;
pub mod models;
pub mod replay;
pub mod storage;
pub mod system;

pub use models::*;
pub use system::{ChessError, ChessSystem};

//! Training Teams API Library
//!
//! Generates balanced teams for club training sessions: participant
//! leveling, team partitioning and the atomic regeneration workflow, plus
//! the repositories and HTTP adapters around them.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

//! # Doubles Scheduler
//!
//! Fair round-robin schedules for doubles play (2 vs 2) across a fixed
//! number of courts, with win/loss tracking.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, rounds, stats)
//! - **schedule**: Greedy round generation and the fairness ledgers
//! - **results**: Recording and clearing match winners
//! - **calculate**: Standings, leaderboard and partnership reports
//! - **storage**: JSON persistence of the roster and session
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod results;
pub mod schedule;
pub mod storage;

pub use models::*;

//! Shardfall - Terminal-Based Idle RPG Library
//!
//! This module exposes the game engine for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod attributes;
pub mod build_info;
pub mod combat_logic;
pub mod constants;
pub mod derived_stats;
pub mod equipment;
pub mod error;
pub mod game_state;
pub mod monster;
pub mod passives;
pub mod progression;
pub mod rules;
pub mod session;
pub mod simulator;
pub mod tick;

// The terminal presentation layer; read-only over game state.
pub mod ui;

//! Endless Wilds - simulation core of an infinite procedural action RPG

pub mod ai;
pub mod combat;
pub mod core;
pub mod entity;
pub mod llm;
pub mod progression;
pub mod render;
pub mod simulation;
pub mod spawn;
pub mod ui;
pub mod world;

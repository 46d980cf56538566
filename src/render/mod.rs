//! Presentation-facing data for Endless Wilds
//!
//! The core never draws. This module owns the pieces a renderer reads:
//! animation frame bookkeeping, the follow camera, the palette, and the
//! per-frame snapshot. Nothing here mutates gameplay state.

pub mod animation;
pub mod camera;
pub mod colors;
pub mod snapshot;

pub use animation::FrameCounts;
pub use camera::Camera;
pub use colors::Color;
pub use snapshot::PresentationSnapshot;

//! Effect engines
//!
//! All animation logic lives here. This module must stay pure:
//! - Time only enters as explicit timestamps or deltas
//! - Seeded RNG only
//! - No DOM or platform dependencies

pub mod decrypt;
pub mod glyphs;
pub mod marquee;
pub mod proximity;
pub mod trigger;

pub use decrypt::{
    Cell, CharPoolMode, DecryptConfig, DecryptText, RevealOrder, RunToken, TickOutcome,
    next_reveal_index,
};
pub use glyphs::{GlyphPool, is_passthrough};
pub use marquee::{
    Direction, ImageSource, ItemContent, MarqueeConfig, MarqueeItem, MarqueeState,
    copies_needed, target_velocity,
};
pub use proximity::{FrameReport, ProximityConfig, ProximityText, ScrambleChar};
pub use trigger::{TriggerAction, TriggerEvent, TriggerGate, TriggerPolicy};

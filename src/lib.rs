//! Folio FX - portfolio page text and logo effects
//!
//! Core modules:
//! - `fx`: Pure effect engines (reveal scramble, pointer scramble, logo marquee)
//! - `dom`: Browser bindings that drive the engines from timers, frames and events
//! - `settings`: Effect defaults and preferences
//! - `content`: Default page content consumed by the effects

pub mod content;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod fx;
pub mod settings;

pub use settings::Settings;

/// Effect configuration constants
pub mod consts {
    /// Default delay between reveal ticks (ms)
    pub const REVEAL_TICK_MS: f64 = 200.0;
    /// Default tick budget for non-sequential reveal runs
    pub const REVEAL_MAX_ITERATIONS: u32 = 10;
    /// Default glyph alphabet for reveal scrambling
    pub const REVEAL_GLYPHS: &str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

    /// Marquee velocity easing time constant (seconds)
    pub const SMOOTH_TAU: f64 = 0.25;
    /// Minimum rendered copies of a marquee sequence
    pub const MIN_COPIES: usize = 2;
    /// Extra copies beyond what the container width needs
    pub const COPY_HEADROOM: usize = 2;
    /// Upper bound on rendered copies, whatever the measurement says
    pub const MAX_COPIES: usize = 512;
    /// Default marquee speed (px/s)
    pub const MARQUEE_SPEED: f64 = 120.0;
    /// Default marquee item height (px)
    pub const MARQUEE_ITEM_HEIGHT: f64 = 28.0;
    /// Default marquee gap between items (px)
    pub const MARQUEE_GAP: f64 = 32.0;

    /// Default pointer radius that triggers a glyph scramble (px)
    pub const SCRAMBLE_RADIUS: f32 = 100.0;
    /// Default length of one glyph scramble (seconds)
    pub const SCRAMBLE_DURATION: f64 = 1.2;
    /// Default glyph substitutions per second
    pub const SCRAMBLE_TICKS_PER_SECOND: f64 = 30.0;
    /// Default scramble glyphs
    pub const SCRAMBLE_GLYPHS: &str = ".:";
}

/// Wrap an offset into [0, period), also for negative offsets.
///
/// Returns 0 for a non-positive period (nothing measured yet).
#[inline]
pub fn wrap_offset(offset: f64, period: f64) -> f64 {
    if !period.is_finite() || period <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let wrapped = ((offset % period) + period) % period;
    // -tiny % p + p can round up to exactly p
    if wrapped >= period { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_offset_positive() {
        assert_eq!(wrap_offset(250.0, 100.0), 50.0);
        assert_eq!(wrap_offset(0.0, 100.0), 0.0);
        assert_eq!(wrap_offset(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_wrap_offset_negative() {
        assert_eq!(wrap_offset(-30.0, 100.0), 70.0);
        assert_eq!(wrap_offset(-120.0, 100.0), 80.0);
        assert_eq!(wrap_offset(-1e-20, 100.0), 0.0);
    }

    #[test]
    fn test_wrap_offset_unmeasured() {
        assert_eq!(wrap_offset(42.0, 0.0), 0.0);
    }

    #[test]
    fn test_wrap_offset_non_finite() {
        assert_eq!(wrap_offset(42.0, f64::INFINITY), 0.0);
        assert_eq!(wrap_offset(42.0, f64::NAN), 0.0);
        assert_eq!(wrap_offset(f64::NAN, 100.0), 0.0);
    }
}

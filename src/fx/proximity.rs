//! Pointer-proximity glyph scramble
//!
//! Every character flickers independently for a fixed wall-clock duration once
//! the pointer comes within range, then snaps back to its original value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::glyphs::{GlyphPool, is_passthrough};
use crate::consts::*;

/// Proximity scramble configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProximityConfig {
    /// Pointer distance below which a glyph starts scrambling (px)
    pub radius_px: f32,
    /// Length of one scramble (seconds)
    pub duration_sec: f64,
    /// Glyph substitutions per second, floored at 1
    pub ticks_per_second: f64,
    pub scramble_charset: String,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            radius_px: SCRAMBLE_RADIUS,
            duration_sec: SCRAMBLE_DURATION,
            ticks_per_second: SCRAMBLE_TICKS_PER_SECOND,
            scramble_charset: SCRAMBLE_GLYPHS.to_string(),
        }
    }
}

impl ProximityConfig {
    /// Minimum time between substitutions (ms)
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.ticks_per_second.max(1.0)
    }
}

/// Animation state of a single character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrambleChar {
    pub original: char,
    pub shown: char,
    pub running: bool,
    /// Absolute end of the current run (ms)
    pub end_ms: f64,
    /// Time of the last substitution in this run
    pub last_tick_ms: Option<f64>,
}

impl ScrambleChar {
    fn new(original: char) -> Self {
        Self {
            original,
            shown: original,
            running: false,
            end_ms: 0.0,
            last_tick_ms: None,
        }
    }
}

/// Result of one animation frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Indices whose displayed glyph changed
    pub changed: Vec<usize>,
    /// Characters still running after this frame
    pub running: usize,
}

/// Proximity scramble state for a body of text
#[derive(Debug, Clone)]
pub struct ProximityText {
    config: ProximityConfig,
    pool: GlyphPool,
    chars: Vec<ScrambleChar>,
    rng: Pcg32,
}

impl ProximityText {
    pub fn new(text: &str, config: ProximityConfig, seed: u64) -> Self {
        Self {
            pool: GlyphPool::new(&config.scramble_charset),
            chars: text.chars().map(ScrambleChar::new).collect(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[ScrambleChar] {
        &self.chars
    }

    pub fn rendered(&self) -> String {
        self.chars.iter().map(|c| c.shown).collect()
    }

    pub fn running_count(&self) -> usize {
        self.chars.iter().filter(|c| c.running).count()
    }

    /// Start scrambling character `index` at `now_ms`.
    ///
    /// Returns false when the index is out of range or already running; a
    /// running character keeps its original end time.
    pub fn trigger(&mut self, index: usize, now_ms: f64) -> bool {
        let duration_ms = self.config.duration_sec * 1000.0;
        let Some(c) = self.chars.get_mut(index) else {
            return false;
        };
        if c.running {
            return false;
        }
        c.running = true;
        c.end_ms = now_ms + duration_ms;
        c.last_tick_ms = None;
        true
    }

    /// Trigger every character whose centre lies strictly within the radius.
    ///
    /// `centers` holds one on-screen centre per character. Returns how many
    /// characters started.
    pub fn trigger_near(&mut self, pointer: Vec2, centers: &[Vec2], now_ms: f64) -> usize {
        let radius = self.config.radius_px;
        let mut started = 0;
        for (index, center) in centers.iter().enumerate().take(self.chars.len()) {
            if pointer.distance(*center) < radius && self.trigger(index, now_ms) {
                started += 1;
            }
        }
        started
    }

    /// Advance all running characters to `now_ms`
    pub fn step(&mut self, now_ms: f64) -> FrameReport {
        let interval = self.config.tick_interval_ms();
        let mut report = FrameReport::default();

        for (index, c) in self.chars.iter_mut().enumerate() {
            if !c.running {
                continue;
            }
            if now_ms >= c.end_ms {
                c.running = false;
                if c.shown != c.original {
                    c.shown = c.original;
                    report.changed.push(index);
                }
                continue;
            }
            let due = c.last_tick_ms.is_none_or(|last| now_ms - last >= interval);
            if due {
                if !is_passthrough(c.original) {
                    let glyph = self.pool.pick(&mut self.rng, c.original);
                    if glyph != c.shown {
                        c.shown = glyph;
                        report.changed.push(index);
                    }
                }
                c.last_tick_ms = Some(now_ms);
            }
            report.running += 1;
        }
        report
    }

    /// Stop every run and restore the original text
    pub fn restore(&mut self) {
        for c in &mut self.chars {
            c.running = false;
            c.shown = c.original;
            c.last_tick_ms = None;
        }
    }
}

//! Decrypt-style text reveal
//!
//! A run locks characters to their true value one tick at a time (sequential)
//! or re-scrambles everything for a fixed number of ticks (random). Every run
//! carries a generation; ticks from an older generation are ignored, so a
//! timer that outlives its run can never touch the display.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::glyphs::{GlyphPool, scramble_fixed, scramble_shuffled};
use super::trigger::{TriggerAction, TriggerEvent, TriggerGate, TriggerPolicy};
use crate::consts::*;

/// Order in which sequential mode locks characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrder {
    /// Left to right
    #[default]
    Start,
    /// Right to left
    End,
    /// Outward from the middle, alternating left then right
    Center,
}

/// Where scramble glyphs come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CharPoolMode {
    /// The configured alphabet
    #[default]
    Fixed,
    /// A shuffle of the text's own hidden characters
    SourceCharsOnly,
}

/// Reveal effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecryptConfig {
    /// Delay between ticks (ms)
    pub tick_interval_ms: f64,
    /// Tick budget in random mode
    pub max_random_iterations: u32,
    /// Lock one character per tick instead of random re-shuffles
    pub sequential: bool,
    pub reveal_order: RevealOrder,
    pub char_pool: CharPoolMode,
    /// Alphabet for `CharPoolMode::Fixed`
    pub characters: String,
    pub trigger: TriggerPolicy,
}

impl Default for DecryptConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: REVEAL_TICK_MS,
            max_random_iterations: REVEAL_MAX_ITERATIONS,
            sequential: true,
            reveal_order: RevealOrder::Start,
            char_pool: CharPoolMode::Fixed,
            characters: REVEAL_GLYPHS.to_string(),
            trigger: TriggerPolicy::Hover,
        }
    }
}

/// Identifies the run a scheduled tick belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token belongs to an older run, nothing changed
    Stale,
    /// No run is active, nothing changed
    Idle,
    /// Display changed, more ticks wanted
    Advanced,
    /// Run finished this tick, display shows the source text
    Completed,
}

impl TickOutcome {
    /// Whether the timer delivering ticks should keep running
    pub fn wants_more(&self) -> bool {
        matches!(self, TickOutcome::Advanced)
    }
}

/// Next index to lock given `revealed` (one flag per char) and how many are set.
///
/// Center order alternates `mid + k/2` (even k) and `mid - (k+1)/2` (odd k);
/// an out-of-range or already locked pick falls back to the first unlocked
/// index from the left.
pub fn next_reveal_index(order: RevealOrder, revealed: &[bool], count: usize) -> usize {
    let n = revealed.len();
    let first_hidden = || revealed.iter().position(|shown| !shown).unwrap_or(0);
    match order {
        RevealOrder::Start => count,
        RevealOrder::End => n.saturating_sub(1 + count),
        RevealOrder::Center => {
            let mid = (n / 2) as isize;
            let k = count as isize;
            let pick = if k % 2 == 0 { mid + k / 2 } else { mid - (k + 1) / 2 };
            if pick >= 0 && (pick as usize) < n && !revealed[pick as usize] {
                pick as usize
            } else {
                first_hidden()
            }
        }
    }
}

/// One rendered character and whether it is showing its true value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub revealed: bool,
}

/// Reveal effect state for one piece of text
#[derive(Debug, Clone)]
pub struct DecryptText {
    config: DecryptConfig,
    pool: GlyphPool,
    source: Vec<char>,
    revealed: Vec<bool>,
    revealed_count: usize,
    display: Vec<char>,
    generation: u64,
    active: bool,
    iteration: u32,
    gate: TriggerGate,
    rng: Pcg32,
}

impl DecryptText {
    pub fn new(text: &str, config: DecryptConfig, seed: u64) -> Self {
        let source: Vec<char> = text.chars().collect();
        Self {
            pool: GlyphPool::new(&config.characters),
            gate: TriggerGate::new(config.trigger),
            revealed: vec![false; source.len()],
            revealed_count: 0,
            display: source.clone(),
            source,
            generation: 0,
            active: false,
            iteration: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &DecryptConfig {
        &self.config
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Text currently on screen
    pub fn rendered(&self) -> String {
        self.display.iter().collect()
    }

    /// Whether a run is animating
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Rendered cells; everything counts as revealed while no run is active
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.display.iter().enumerate().map(move |(i, &ch)| Cell {
            ch,
            revealed: !self.active || self.revealed[i],
        })
    }

    /// Replace the source text, cancelling any run
    pub fn set_text(&mut self, text: &str) {
        let source: Vec<char> = text.chars().collect();
        if source == self.source {
            return;
        }
        self.source = source;
        self.gate.rearm();
        self.reset();
    }

    /// Feed a host event through the trigger policy.
    ///
    /// Returns the token of a newly started run, if any.
    pub fn handle(&mut self, event: TriggerEvent) -> Option<RunToken> {
        match self.gate.on_event(event) {
            TriggerAction::Start => self.start_run(),
            TriggerAction::Reset => {
                self.reset();
                None
            }
            TriggerAction::Ignore => None,
        }
    }

    /// Begin a fresh run. Any earlier run's ticks become stale.
    ///
    /// Returns `None` for empty text (nothing to animate).
    pub fn start_run(&mut self) -> Option<RunToken> {
        self.generation += 1;
        self.clear_progress();
        if self.source.is_empty() {
            return None;
        }
        self.active = true;
        log::debug!(
            "reveal run {} started ({} chars, {:?})",
            self.generation,
            self.source.len(),
            self.config.reveal_order
        );
        Some(RunToken(self.generation))
    }

    /// Stop any run and show the static source text
    pub fn reset(&mut self) {
        self.generation += 1;
        self.clear_progress();
    }

    /// Advance the run identified by `token` by one tick
    pub fn tick(&mut self, token: RunToken) -> TickOutcome {
        if token.0 != self.generation {
            return TickOutcome::Stale;
        }
        if !self.active {
            return TickOutcome::Idle;
        }

        if self.config.sequential {
            let next = next_reveal_index(
                self.config.reveal_order,
                &self.revealed,
                self.revealed_count,
            );
            if let Some(slot) = self.revealed.get_mut(next) {
                if !*slot {
                    *slot = true;
                    self.revealed_count += 1;
                }
            }
            if self.revealed_count >= self.source.len() {
                return self.complete();
            }
            self.scramble();
            TickOutcome::Advanced
        } else {
            self.scramble();
            self.iteration += 1;
            if self.iteration >= self.config.max_random_iterations {
                return self.complete();
            }
            TickOutcome::Advanced
        }
    }

    fn complete(&mut self) -> TickOutcome {
        self.active = false;
        self.display.clone_from(&self.source);
        log::debug!("reveal run {} complete", self.generation);
        TickOutcome::Completed
    }

    fn clear_progress(&mut self) {
        self.revealed.clear();
        self.revealed.resize(self.source.len(), false);
        self.revealed_count = 0;
        self.iteration = 0;
        self.active = false;
        self.display.clone_from(&self.source);
    }

    fn scramble(&mut self) {
        match self.config.char_pool {
            CharPoolMode::Fixed => scramble_fixed(
                &self.source,
                &self.revealed,
                &self.pool,
                &mut self.rng,
                &mut self.display,
            ),
            CharPoolMode::SourceCharsOnly => {
                scramble_shuffled(&self.source, &self.revealed, &mut self.rng, &mut self.display)
            }
        }
    }
}

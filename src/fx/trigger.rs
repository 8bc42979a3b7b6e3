//! Trigger policies for the reveal effect
//!
//! Maps hover and viewport events to run starts and resets.

use serde::{Deserialize, Serialize};

/// When a reveal run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TriggerPolicy {
    /// Pointer enter starts a run, pointer leave resets
    #[default]
    #[serde(rename = "hover")]
    Hover,
    /// First viewport entry starts a run, later entries are ignored
    #[serde(rename = "viewport-once", alias = "view")]
    ViewportOnce,
    /// Every viewport entry starts a run, leaving resets
    #[serde(rename = "viewport-repeat", alias = "view-repeat")]
    ViewportRepeat,
    /// Hover plus a single viewport-triggered run
    #[serde(rename = "hover+viewport-once", alias = "both")]
    HoverViewportOnce,
    /// Hover plus a run on every viewport entry
    #[serde(rename = "hover+viewport-repeat", alias = "both-repeat")]
    HoverViewportRepeat,
}

impl TriggerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerPolicy::Hover => "hover",
            TriggerPolicy::ViewportOnce => "viewport-once",
            TriggerPolicy::ViewportRepeat => "viewport-repeat",
            TriggerPolicy::HoverViewportOnce => "hover+viewport-once",
            TriggerPolicy::HoverViewportRepeat => "hover+viewport-repeat",
        }
    }

    /// Whether pointer enter/leave drive runs
    pub fn uses_hover(&self) -> bool {
        matches!(
            self,
            TriggerPolicy::Hover
                | TriggerPolicy::HoverViewportOnce
                | TriggerPolicy::HoverViewportRepeat
        )
    }

    /// Whether viewport intersection drives runs
    pub fn uses_viewport(&self) -> bool {
        !matches!(self, TriggerPolicy::Hover)
    }

    /// Whether every viewport entry may restart the effect
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            TriggerPolicy::ViewportRepeat | TriggerPolicy::HoverViewportRepeat
        )
    }
}

/// Host events relevant to triggering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    PointerEnter,
    PointerLeave,
    ViewportEnter,
    ViewportLeave,
}

/// What the effect should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Begin a fresh run (invalidating any in-flight one)
    Start,
    /// Drop back to the static source text
    Reset,
    /// Nothing to do
    Ignore,
}

/// Per-instance trigger gate, remembers whether a once-only viewport run fired
#[derive(Debug, Clone, Default)]
pub struct TriggerGate {
    policy: TriggerPolicy,
    viewport_fired: bool,
}

impl TriggerGate {
    pub fn new(policy: TriggerPolicy) -> Self {
        Self {
            policy,
            viewport_fired: false,
        }
    }

    /// Decide the action for `event`, updating once-only bookkeeping
    pub fn on_event(&mut self, event: TriggerEvent) -> TriggerAction {
        match event {
            TriggerEvent::PointerEnter if self.policy.uses_hover() => TriggerAction::Start,
            TriggerEvent::PointerLeave if self.policy.uses_hover() => TriggerAction::Reset,
            TriggerEvent::ViewportEnter if self.policy.uses_viewport() => {
                if self.policy.repeats() || !self.viewport_fired {
                    self.viewport_fired = true;
                    TriggerAction::Start
                } else {
                    TriggerAction::Ignore
                }
            }
            TriggerEvent::ViewportLeave if self.policy.repeats() => TriggerAction::Reset,
            _ => TriggerAction::Ignore,
        }
    }

    /// Forget that a once-only viewport run already happened (text changed)
    pub fn rearm(&mut self) {
        self.viewport_fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_only_ignores_viewport() {
        let mut gate = TriggerGate::new(TriggerPolicy::Hover);
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Ignore);
        assert_eq!(gate.on_event(TriggerEvent::PointerEnter), TriggerAction::Start);
        assert_eq!(gate.on_event(TriggerEvent::PointerLeave), TriggerAction::Reset);
    }

    #[test]
    fn test_viewport_once_fires_once() {
        let mut gate = TriggerGate::new(TriggerPolicy::ViewportOnce);
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Start);
        assert_eq!(gate.on_event(TriggerEvent::ViewportLeave), TriggerAction::Ignore);
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Ignore);
        assert_eq!(gate.on_event(TriggerEvent::PointerEnter), TriggerAction::Ignore);
    }

    #[test]
    fn test_viewport_repeat_restarts() {
        let mut gate = TriggerGate::new(TriggerPolicy::ViewportRepeat);
        for _ in 0..3 {
            assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Start);
            assert_eq!(gate.on_event(TriggerEvent::ViewportLeave), TriggerAction::Reset);
        }
    }

    #[test]
    fn test_both_once_keeps_hover() {
        let mut gate = TriggerGate::new(TriggerPolicy::HoverViewportOnce);
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Start);
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Ignore);
        assert_eq!(gate.on_event(TriggerEvent::PointerEnter), TriggerAction::Start);
        assert_eq!(gate.on_event(TriggerEvent::PointerLeave), TriggerAction::Reset);
    }

    #[test]
    fn test_rearm_allows_new_viewport_run() {
        let mut gate = TriggerGate::new(TriggerPolicy::ViewportOnce);
        gate.on_event(TriggerEvent::ViewportEnter);
        gate.rearm();
        assert_eq!(gate.on_event(TriggerEvent::ViewportEnter), TriggerAction::Start);
    }

    #[test]
    fn test_policy_parsing() {
        assert!(serde_json::from_str::<TriggerPolicy>("\"click\"").is_err());
        let p: TriggerPolicy = serde_json::from_str("\"both-repeat\"").unwrap();
        assert_eq!(p, TriggerPolicy::HoverViewportRepeat);
        let p: TriggerPolicy = serde_json::from_str("\"view-repeat\"").unwrap();
        assert_eq!(p, TriggerPolicy::ViewportRepeat);
        let p: TriggerPolicy = serde_json::from_str("\"hover+viewport-once\"").unwrap();
        assert_eq!(p, TriggerPolicy::HoverViewportOnce);
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"hover+viewport-once\"");
    }
}

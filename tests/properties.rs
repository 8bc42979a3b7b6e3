//! Property tests for the effect engines

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use folio_fx::fx::{
    CharPoolMode, DecryptConfig, DecryptText, Direction, MarqueeConfig, MarqueeState,
    ProximityConfig, ProximityText, RevealOrder, TickOutcome, copies_needed,
};
use folio_fx::consts::MAX_COPIES;
use folio_fx::wrap_offset;

fn order() -> impl Strategy<Value = RevealOrder> {
    prop_oneof![
        Just(RevealOrder::Start),
        Just(RevealOrder::End),
        Just(RevealOrder::Center),
    ]
}

fn pool() -> impl Strategy<Value = CharPoolMode> {
    prop_oneof![Just(CharPoolMode::Fixed), Just(CharPoolMode::SourceCharsOnly)]
}

fn spaces_at(text: &str) -> Vec<usize> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn reveal_keeps_length_and_whitespace(
        text in "[a-zA-Z0-9 ,.áé]{0,40}",
        sequential in any::<bool>(),
        order in order(),
        pool in pool(),
        seed in any::<u64>(),
    ) {
        let config = DecryptConfig {
            sequential,
            reveal_order: order,
            char_pool: pool,
            max_random_iterations: 8,
            ..Default::default()
        };
        let len = text.chars().count();
        let spaces = spaces_at(&text);
        let mut fx = DecryptText::new(&text, config, seed);
        let Some(token) = fx.start_run() else {
            prop_assert_eq!(len, 0);
            return Ok(());
        };

        let mut ticks = 0;
        loop {
            let outcome = fx.tick(token);
            let shown: Vec<char> = fx.rendered().chars().collect();
            prop_assert_eq!(shown.len(), len);
            for &i in &spaces {
                prop_assert!(shown[i].is_whitespace());
            }
            ticks += 1;
            prop_assert!(ticks <= len + 8);
            if !outcome.wants_more() {
                prop_assert_eq!(outcome, TickOutcome::Completed);
                break;
            }
        }
        prop_assert!(!fx.is_active());
        prop_assert_eq!(fx.rendered(), text);
    }

    #[test]
    fn sequential_reveal_is_monotonic_and_complete(
        text in "[a-z]{1,30}",
        order in order(),
        seed in any::<u64>(),
    ) {
        let config = DecryptConfig { reveal_order: order, ..Default::default() };
        let mut fx = DecryptText::new(&text, config, seed);
        let token = fx.start_run().unwrap();
        let mut seen = HashSet::new();
        let mut previous = 0;

        loop {
            let outcome = fx.tick(token);
            let revealed: HashSet<usize> = (0..fx.len()).filter(|&i| fx.is_revealed(i)).collect();
            prop_assert!(revealed.is_superset(&seen));
            prop_assert_eq!(fx.revealed_count(), previous + 1);
            previous = fx.revealed_count();
            seen = revealed;
            if !outcome.wants_more() {
                break;
            }
        }
        prop_assert_eq!(seen.len(), text.len());
    }

    #[test]
    fn stale_ticks_never_mutate(
        first in "[A-Z]{1,12}",
        second in "[a-z]{1,12}",
        head_start in 0usize..6,
        seed in any::<u64>(),
    ) {
        let mut fx = DecryptText::new(&first, DecryptConfig::default(), seed);
        let old = fx.start_run().unwrap();
        for _ in 0..head_start {
            fx.tick(old);
        }
        fx.set_text(&second);
        let new = fx.start_run().unwrap();
        fx.tick(new);

        let shown = fx.rendered();
        let count = fx.revealed_count();
        for _ in 0..4 {
            prop_assert_eq!(fx.tick(old), TickOutcome::Stale);
            prop_assert_eq!(&fx.rendered(), &shown);
            prop_assert_eq!(fx.revealed_count(), count);
        }
    }

    #[test]
    fn copies_cover_container(container in 0.0f64..10_000.0, sequence in 20.0f64..5_000.0) {
        let copies = copies_needed(container, sequence).unwrap();
        prop_assert!(copies >= 2);
        prop_assert!(copies as f64 * sequence >= container);
    }

    #[test]
    fn copies_stay_bounded_for_tiny_sequences(
        container in 0.0f64..1e6,
        exp in -300i32..0,
    ) {
        let copies = copies_needed(container, 10f64.powi(exp)).unwrap();
        prop_assert!((2..=MAX_COPIES).contains(&copies));
    }

    #[test]
    fn offset_stays_in_range(
        speed in -2_000.0f64..2_000.0,
        right in any::<bool>(),
        sequence in 1.0f64..2_000.0,
        frames in proptest::collection::vec(0.0f64..250.0, 1..60),
    ) {
        let config = MarqueeConfig {
            pixels_per_second: speed,
            direction: if right { Direction::Right } else { Direction::Left },
            ..Default::default()
        };
        let mut state = MarqueeState::new(config);
        state.measure(800.0, sequence);
        let width = state.sequence_width();
        let mut t = 0.0;
        for dt in frames {
            t += dt;
            state.frame(t);
            prop_assert!(state.offset() >= 0.0 && state.offset() < width);
        }
    }

    #[test]
    fn wrap_offset_matches_modulo(offset in -1e6f64..1e6, period in 1.0f64..1e4) {
        let wrapped = wrap_offset(offset, period);
        prop_assert!((0.0..period).contains(&wrapped));
        let k = ((offset - wrapped) / period).round();
        prop_assert!((offset - wrapped - k * period).abs() < 1e-6 * period.max(offset.abs()));
    }

    #[test]
    fn proximity_retrigger_keeps_end_time(
        retriggers in proptest::collection::vec(0.0f64..1_199.0, 1..20),
    ) {
        let mut fx = ProximityText::new("a b", ProximityConfig::default(), 3);
        prop_assert!(fx.trigger(0, 0.0));
        let end = fx.chars()[0].end_ms;
        for t in retriggers {
            prop_assert!(!fx.trigger(0, t));
            fx.trigger_near(Vec2::ZERO, &[Vec2::ZERO, Vec2::ZERO, Vec2::ZERO], t);
            prop_assert_eq!(fx.chars()[0].end_ms, end);
        }
    }

    #[test]
    fn proximity_never_scrambles_spaces(
        text in "[a-z ]{1,20}",
        steps in proptest::collection::vec(1.0f64..80.0, 1..40),
        seed in any::<u64>(),
    ) {
        let mut fx = ProximityText::new(&text, ProximityConfig::default(), seed);
        let spaces = spaces_at(&text);
        for i in 0..fx.len() {
            fx.trigger(i, 0.0);
        }
        let mut now = 0.0;
        for dt in steps {
            now += dt;
            fx.step(now);
            let shown: Vec<char> = fx.rendered().chars().collect();
            prop_assert_eq!(shown.len(), fx.len());
            for &i in &spaces {
                prop_assert_eq!(shown[i], ' ');
            }
        }
    }
}

#[test]
fn reverse_scroll_wraps_instead_of_going_negative() {
    let config = MarqueeConfig {
        pixels_per_second: 30.0,
        direction: Direction::Right,
        ..Default::default()
    };
    let mut state = MarqueeState::new(config);
    state.measure(50.0, 100.0);
    // Let the velocity settle at -30px/s, then scroll for one more second
    for _ in 0..600 {
        state.advance(1.0 / 60.0);
    }
    let start = state.offset();
    state.advance(1.0);
    let expected = wrap_offset(start - 30.0, 100.0);
    assert!((state.offset() - expected).abs() < 1e-3);
    assert_eq!(wrap_offset(-30.0, 100.0), 70.0);
}

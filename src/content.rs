//! Default page content fed to the effects

use crate::fx::{DecryptConfig, Direction, MarqueeConfig, MarqueeItem, RevealOrder, TriggerPolicy};

/// Hero tagline revealed when the hero scrolls into view
pub const HERO_TAGLINE: &str = "Construyo soluciones modernas con React, Node.js y Django. \
Enfocado en calidad, integración y experiencia de usuario.";

/// Tick interval used for the hero tagline (ms)
pub const HERO_TICK_MS: f64 = 50.0;

/// Hero tagline reveal: fast, left to right, once it scrolls into view
pub fn hero_decrypt() -> DecryptConfig {
    DecryptConfig {
        tick_interval_ms: HERO_TICK_MS,
        sequential: true,
        reveal_order: RevealOrder::Start,
        trigger: TriggerPolicy::ViewportOnce,
        ..Default::default()
    }
}

/// Skills strip under the hero
pub fn skills_loop() -> MarqueeConfig {
    MarqueeConfig {
        pixels_per_second: 110.0,
        direction: Direction::Left,
        item_height_px: 42.0,
        gap_px: 60.0,
        fade_out: true,
        fade_out_color: Some("transparent".to_string()),
        scale_on_hover: true,
        aria_label: "Tecnologías que uso".to_string(),
        ..Default::default()
    }
}

/// (title, homepage) of every technology in the logo strip
pub const TECH_LOGOS: &[(&str, &str)] = &[
    ("React", "https://react.dev"),
    ("Next.js", "https://nextjs.org"),
    ("Node.js", "https://nodejs.org"),
    ("Django", "https://www.djangoproject.com"),
    ("TailwindCSS", "https://tailwindcss.com"),
    ("MySQL", "https://mysql.com"),
];

/// Logo strip items; each node renders its title as a text badge
pub fn tech_logos() -> Vec<MarqueeItem> {
    TECH_LOGOS
        .iter()
        .map(|&(title, href)| {
            let markup = format!("<span class=\"logoloop__badge\">{}</span>", title);
            MarqueeItem::node(&markup, title, Some(href))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tech_logos_are_linked() {
        let items = tech_logos();
        assert_eq!(items.len(), TECH_LOGOS.len());
        assert!(items.iter().all(|i| i.href.is_some()));
        assert_eq!(items[0].label(), Some("React"));
    }

    #[test]
    fn test_hero_reveals_from_start_on_view() {
        let config = hero_decrypt();
        assert_eq!(config.tick_interval_ms, 50.0);
        assert_eq!(config.reveal_order, RevealOrder::Start);
        assert_eq!(config.trigger, TriggerPolicy::ViewportOnce);
        assert!(config.sequential);
    }

    #[test]
    fn test_skills_strip_config() {
        let config = skills_loop();
        assert_eq!(config.target_velocity(), 110.0);
        assert_eq!((config.item_height_px, config.gap_px), (42.0, 60.0));
        assert!(config.fade_out && config.scale_on_hover && !config.pause_on_hover);
        assert_eq!(config.aria_label, "Tecnologías que uso");
    }
}

//! Seamless logo marquee
//!
//! One measured copy of the item sequence is tiled enough times to cover the
//! container plus headroom. The track offset wraps modulo the sequence width,
//! so every wrap lands on a visually identical copy.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::wrap_offset;

/// Scroll direction of the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
}

/// Marquee configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarqueeConfig {
    /// Signed speed in px/s; a negative value inverts `direction`
    pub pixels_per_second: f64,
    pub direction: Direction,
    pub item_height_px: f64,
    pub gap_px: f64,
    pub pause_on_hover: bool,
    /// Fade the strip edges
    pub fade_out: bool,
    pub fade_out_color: Option<String>,
    /// Enlarge items under the pointer
    pub scale_on_hover: bool,
    pub aria_label: String,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            pixels_per_second: MARQUEE_SPEED,
            direction: Direction::Left,
            item_height_px: MARQUEE_ITEM_HEIGHT,
            gap_px: MARQUEE_GAP,
            pause_on_hover: false,
            fade_out: false,
            fade_out_color: None,
            scale_on_hover: false,
            aria_label: "Partner logos".to_string(),
        }
    }
}

impl MarqueeConfig {
    /// Velocity the track eases toward when not paused (px/s, positive = leftward)
    pub fn target_velocity(&self) -> f64 {
        target_velocity(self.pixels_per_second, self.direction)
    }

    /// Root element classes
    pub fn root_classes(&self) -> String {
        let mut classes = vec!["logoloop"];
        if self.fade_out {
            classes.push("logoloop--fade");
        }
        if self.scale_on_hover {
            classes.push("logoloop--scale-hover");
        }
        classes.join(" ")
    }

    /// CSS custom properties for the root element
    pub fn css_vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("--logoloop-gap", format!("{}px", self.gap_px)),
            ("--logoloop-logoHeight", format!("{}px", self.item_height_px)),
        ];
        if let Some(color) = &self.fade_out_color {
            vars.push(("--logoloop-fadeColor", color.clone()));
        }
        vars
    }
}

/// `|speed| * direction sign * speed sign`
pub fn target_velocity(speed: f64, direction: Direction) -> f64 {
    let dir = match direction {
        Direction::Left => 1.0,
        Direction::Right => -1.0,
    };
    let mult = if speed < 0.0 { -1.0 } else { 1.0 };
    speed.abs() * dir * mult
}

/// Copies needed so the tiled track always overfills the container.
///
/// `None` until a finite sequence width has been measured. Capped at
/// `MAX_COPIES` for degenerate sub-pixel sequences.
pub fn copies_needed(container_px: f64, sequence_px: f64) -> Option<usize> {
    if !sequence_px.is_finite() || sequence_px <= 0.0 {
        return None;
    }
    let fit = (container_px.max(0.0) / sequence_px)
        .ceil()
        .min(MAX_COPIES as f64) as usize;
    Some(fit.saturating_add(COPY_HEADROOM).clamp(MIN_COPIES, MAX_COPIES))
}

/// Blend factor for exponential easing over `dt` seconds
#[inline]
pub fn ease_factor(dt: f64, tau: f64) -> f64 {
    1.0 - (-dt / tau).exp()
}

/// Image displayed as a marquee item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSource {
    pub src: String,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// Item body: arbitrary markup or an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ItemContent {
    Node {
        markup: String,
        #[serde(default)]
        aria_label: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
    Image(ImageSource),
}

/// One entry of the marquee sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeItem {
    #[serde(flatten)]
    pub content: ItemContent,
    #[serde(default)]
    pub href: Option<String>,
}

impl MarqueeItem {
    pub fn node(markup: &str, title: &str, href: Option<&str>) -> Self {
        Self {
            content: ItemContent::Node {
                markup: markup.to_string(),
                aria_label: None,
                title: Some(title.to_string()),
            },
            href: href.map(str::to_string),
        }
    }

    pub fn image(image: ImageSource, href: Option<&str>) -> Self {
        Self {
            content: ItemContent::Image(image),
            href: href.map(str::to_string),
        }
    }

    /// Accessible label: node aria label or title, image alt or title
    pub fn label(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Node {
                aria_label, title, ..
            } => aria_label.as_deref().or(title.as_deref()),
            ItemContent::Image(img) => img.alt.as_deref().or(img.title.as_deref()),
        }
    }

    /// Label for the wrapping link
    pub fn link_label(&self) -> &str {
        self.label().filter(|l| !l.is_empty()).unwrap_or("logo link")
    }
}

/// Scroll and sizing state of one marquee
#[derive(Debug, Clone)]
pub struct MarqueeState {
    config: MarqueeConfig,
    sequence_width: f64,
    copy_count: usize,
    offset: f64,
    velocity: f64,
    last_frame_ms: Option<f64>,
    hovered: bool,
}

impl MarqueeState {
    pub fn new(config: MarqueeConfig) -> Self {
        Self {
            config,
            sequence_width: 0.0,
            copy_count: MIN_COPIES,
            offset: 0.0,
            velocity: 0.0,
            last_frame_ms: None,
            hovered: false,
        }
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn sequence_width(&self) -> f64 {
        self.sequence_width
    }

    pub fn copy_count(&self) -> usize {
        self.copy_count
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Horizontal translation to apply to the track (px)
    pub fn translate_x(&self) -> f64 {
        -self.offset
    }

    /// Record fresh layout measurements.
    ///
    /// Ignored while the sequence has no width. Returns true when the copy
    /// count changed and the track must be rebuilt.
    pub fn measure(&mut self, container_px: f64, sequence_px: f64) -> bool {
        let Some(copies) = copies_needed(container_px, sequence_px) else {
            return false;
        };
        self.sequence_width = sequence_px.ceil();
        self.offset = wrap_offset(self.offset, self.sequence_width);
        let changed = copies != self.copy_count;
        self.copy_count = copies;
        if changed {
            log::debug!(
                "marquee: sequence {}px, container {}px -> {} copies",
                self.sequence_width,
                container_px,
                copies
            );
        }
        changed
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.config.pause_on_hover {
            self.hovered = hovered;
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Velocity currently aimed for (zero while paused by hover)
    pub fn current_target(&self) -> f64 {
        if self.config.pause_on_hover && self.hovered {
            0.0
        } else {
            self.config.target_velocity()
        }
    }

    /// Forget the last frame timestamp; the next frame has zero elapsed time
    pub fn restart(&mut self) {
        self.last_frame_ms = None;
        self.offset = wrap_offset(self.offset, self.sequence_width);
    }

    /// Handle a display refresh at `timestamp_ms`, returning the translation
    pub fn frame(&mut self, timestamp_ms: f64) -> f64 {
        let last = self.last_frame_ms.unwrap_or(timestamp_ms);
        let dt = (timestamp_ms - last).max(0.0) / 1000.0;
        self.last_frame_ms = Some(timestamp_ms);
        self.advance(dt);
        self.translate_x()
    }

    /// Ease velocity and move the track by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        let target = self.current_target();
        self.velocity += (target - self.velocity) * ease_factor(dt, SMOOTH_TAU);
        if self.sequence_width > 0.0 {
            self.offset = wrap_offset(self.offset + self.velocity * dt, self.sequence_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_velocity_signs() {
        assert_eq!(target_velocity(120.0, Direction::Left), 120.0);
        assert_eq!(target_velocity(120.0, Direction::Right), -120.0);
        assert_eq!(target_velocity(-120.0, Direction::Left), -120.0);
        assert_eq!(target_velocity(-120.0, Direction::Right), 120.0);
    }

    #[test]
    fn test_copies_needed() {
        assert_eq!(copies_needed(1000.0, 0.0), None);
        assert_eq!(copies_needed(1000.0, 300.0), Some(6));
        assert_eq!(copies_needed(0.0, 300.0), Some(2));
        assert_eq!(copies_needed(50.0, 5000.0), Some(3));
    }

    #[test]
    fn test_degenerate_widths_stay_bounded() {
        assert_eq!(copies_needed(1000.0, 1e-300), Some(MAX_COPIES));
        assert_eq!(copies_needed(f64::INFINITY, 10.0), Some(MAX_COPIES));
        assert_eq!(copies_needed(1000.0, f64::INFINITY), None);
        assert_eq!(copies_needed(1000.0, f64::NAN), None);

        let mut m = MarqueeState::new(MarqueeConfig::default());
        m.measure(800.0, 400.0);
        m.advance(0.5);
        let before = m.offset();
        assert!(!m.measure(800.0, f64::INFINITY));
        m.advance(0.1);
        assert!(m.offset().is_finite());
        assert!(m.offset() >= before && m.offset() < m.sequence_width());
    }

    #[test]
    fn test_measure_rounds_width_up() {
        let mut m = MarqueeState::new(MarqueeConfig::default());
        assert!(m.measure(1000.0, 299.2));
        assert_eq!(m.sequence_width(), 300.0);
        assert_eq!(m.copy_count(), 6);
        assert!(!m.measure(1000.0, 299.2));
    }

    #[test]
    fn test_zero_width_measure_ignored() {
        let mut m = MarqueeState::new(MarqueeConfig::default());
        assert!(!m.measure(1000.0, 0.0));
        assert_eq!(m.copy_count(), MIN_COPIES);
        m.advance(1.0);
        assert_eq!(m.offset(), 0.0);
    }

    #[test]
    fn test_velocity_eases_toward_target() {
        let mut m = MarqueeState::new(MarqueeConfig::default());
        m.measure(500.0, 1000.0);
        m.advance(SMOOTH_TAU);
        let expected = 120.0 * (1.0 - (-1.0f64).exp());
        assert!((m.velocity() - expected).abs() < 1e-9);
        for _ in 0..200 {
            m.advance(1.0 / 60.0);
        }
        assert!((m.velocity() - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_hover_pause_decelerates() {
        let config = MarqueeConfig {
            pause_on_hover: true,
            ..Default::default()
        };
        let mut m = MarqueeState::new(config);
        m.measure(500.0, 1000.0);
        for _ in 0..200 {
            m.advance(1.0 / 60.0);
        }
        m.set_hovered(true);
        assert_eq!(m.current_target(), 0.0);
        m.advance(1.0 / 60.0);
        assert!(m.velocity() > 0.0 && m.velocity() < 120.0);
        for _ in 0..300 {
            m.advance(1.0 / 60.0);
        }
        assert!(m.velocity().abs() < 0.01);
    }

    #[test]
    fn test_hover_ignored_without_pause() {
        let mut m = MarqueeState::new(MarqueeConfig::default());
        m.set_hovered(true);
        assert!(!m.is_hovered());
        assert_eq!(m.current_target(), 120.0);
    }

    #[test]
    fn test_first_frame_has_no_elapsed_time() {
        let mut m = MarqueeState::new(MarqueeConfig::default());
        m.measure(500.0, 1000.0);
        assert_eq!(m.frame(5000.0), 0.0);
        m.frame(5100.0);
        assert!(m.offset() > 0.0);

        let offset = m.offset();
        m.restart();
        m.frame(90_000.0);
        assert_eq!(m.offset(), offset);
    }

    #[test]
    fn test_reverse_direction_wraps() {
        let config = MarqueeConfig {
            pixels_per_second: 30.0,
            direction: Direction::Right,
            ..Default::default()
        };
        let mut m = MarqueeState::new(config);
        m.measure(50.0, 100.0);
        for _ in 0..600 {
            m.advance(1.0 / 60.0);
            assert!(m.offset() >= 0.0 && m.offset() < 100.0);
        }
        assert!(m.velocity() < 0.0);
    }

    #[test]
    fn test_root_classes_and_vars() {
        let config = MarqueeConfig {
            fade_out: true,
            scale_on_hover: true,
            fade_out_color: Some("transparent".into()),
            gap_px: 60.0,
            item_height_px: 42.0,
            ..Default::default()
        };
        assert_eq!(
            config.root_classes(),
            "logoloop logoloop--fade logoloop--scale-hover"
        );
        let vars = config.css_vars();
        assert_eq!(vars[0], ("--logoloop-gap", "60px".to_string()));
        assert_eq!(vars[1], ("--logoloop-logoHeight", "42px".to_string()));
        assert_eq!(vars[2], ("--logoloop-fadeColor", "transparent".to_string()));
    }

    #[test]
    fn test_item_labels() {
        let node = MarqueeItem::node("<svg/>", "React", Some("https://react.dev"));
        assert_eq!(node.label(), Some("React"));

        let img = MarqueeItem::image(
            ImageSource {
                src: "logo.png".into(),
                title: Some("Title".into()),
                ..Default::default()
            },
            None,
        );
        assert_eq!(img.label(), Some("Title"));

        let bare = MarqueeItem::image(ImageSource::default(), Some("https://x"));
        assert_eq!(bare.link_label(), "logo link");
    }

    #[test]
    fn test_items_from_json() {
        let items: Vec<MarqueeItem> = serde_json::from_str(
            r#"[
                {"node": {"markup": "<b>Rust</b>", "title": "Rust"}, "href": "https://rust-lang.org"},
                {"image": {"src": "a.svg", "alt": "A"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label(), Some("Rust"));
        assert_eq!(items[0].href.as_deref(), Some("https://rust-lang.org"));
        assert!(matches!(items[1].content, ItemContent::Image(_)));
        assert_eq!(items[1].href, None);
    }
}

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::math::{progress, smoothstep};

/// Page backdrop: a CSS gradient plus an accent colour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub accent: String,
}

pub const COVER_BACKGROUND: &str = "linear-gradient(135deg, #0a1f2e 0%, #16384a 25%, #1a4d5e 50%, #16384a 75%, #0a1f2e 100%)";
pub const COVER_ACCENT: &str = "#2a6d7e";

/// Alpha of the accent tint at the rim of the atmosphere overlay (`0x15`).
const ATMOSPHERE_ALPHA: f32 = 0x15 as f32 / 255.0;

impl Theme {
    pub fn cover() -> Self {
        Self {
            background: COVER_BACKGROUND.to_string(),
            accent: COVER_ACCENT.to_string(),
        }
    }

    /// Accent as a colour; catalog validation guarantees it parses, the
    /// cover accent is the fallback for hand-built themes.
    pub fn accent_rgb(&self) -> Rgb {
        Rgb::from_hex(&self.accent).unwrap_or(Rgb::new(0x2a, 0x6d, 0x7e))
    }

    /// Radial overlay stop: accent tinted to a faint alpha.
    pub fn atmosphere(&self) -> Rgba {
        self.accent_rgb().with_alpha(ATMOSPHERE_ALPHA)
    }
}

/// Cross-fade between the previous and the current theme.
///
/// Gradients cannot be interpolated directly, so the shell stacks both
/// layers and uses `progress` as the opacity of the incoming one.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeFade {
    from: Theme,
    to: Theme,
    started_ms: f64,
    duration_ms: f64,
}

/// Snapshot of a [`ThemeFade`] at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeSample<'a> {
    pub from: &'a Theme,
    pub to: &'a Theme,
    /// Eased progress in [0,1].
    pub progress: f32,
    pub accent: Rgb,
    pub atmosphere: Rgba,
}

impl ThemeFade {
    /// A settled fade showing `theme`.
    pub fn settled(theme: Theme, duration_ms: f64) -> Self {
        Self {
            from: theme.clone(),
            to: theme,
            started_ms: f64::NEG_INFINITY,
            duration_ms,
        }
    }

    pub fn target(&self) -> &Theme {
        &self.to
    }

    /// Start fading toward `theme`. Retargeting mid-fade starts from the
    /// previous target, which is what the shell is mostly showing by then.
    pub fn retarget(&mut self, theme: Theme, now_ms: f64) {
        if theme == self.to {
            return;
        }
        self.from = std::mem::replace(&mut self.to, theme);
        self.started_ms = now_ms;
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        progress(self.started_ms, now_ms, self.duration_ms) >= 1.0
    }

    pub fn sample(&self, now_ms: f64) -> ThemeSample<'_> {
        let t = smoothstep(0.0, 1.0, progress(self.started_ms, now_ms, self.duration_ms));
        let accent = self.from.accent_rgb().lerp(self.to.accent_rgb(), t);
        let atmosphere = self
            .from
            .atmosphere()
            .rgb
            .lerp(self.to.atmosphere().rgb, t)
            .with_alpha(ATMOSPHERE_ALPHA);
        ThemeSample {
            from: &self.from,
            to: &self.to,
            progress: t,
            accent,
            atmosphere,
        }
    }
}

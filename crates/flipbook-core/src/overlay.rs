//! Declarative decoration layers drawn behind the page, keyed by motif.
//!
//! The layers themselves are static markup owned by the shell; the only
//! moving part is the storm flash of the lightning motif.

use rand::Rng;

use crate::motif::Motif;

const FLASH_INTERVAL_MS: f64 = 3000.0;
const FLASH_DURATION_MS: f64 = 150.0;
/// A roll above this value lights the flash.
const FLASH_THRESHOLD: f32 = 0.7;

/// Class names of the decoration layers for `motif`, back to front.
pub fn layers(motif: Motif) -> &'static [&'static str] {
    match motif {
        Motif::Mountain => &[
            "mountain-fog fog-layer-1",
            "mountain-fog fog-layer-2",
            "mountain-silhouette",
        ],
        Motif::Water => &[
            "water-ripple ripple-1",
            "water-ripple ripple-2",
            "water-ripple ripple-3",
            "water-waves",
        ],
        Motif::Feather => &[
            "feather-glow",
            "wing-shimmer wing-left",
            "wing-shimmer wing-right",
        ],
        Motif::Echo => &[
            "echo-ring ring-1",
            "echo-ring ring-2",
            "echo-ring ring-3",
            "void-pulse",
        ],
        Motif::Lightning => &["lightning-flash", "storm-clouds", "rain-overlay"],
        Motif::Aurora => &[
            "aurora-wave wave-1",
            "aurora-wave wave-2",
            "aurora-wave wave-3",
            "northern-stars",
        ],
        Motif::Golden => &["golden-rays", "summit-glow", "triumph-sparkles"],
    }
}

/// Random storm flash: every few seconds a roll may light the sky briefly.
#[derive(Clone, Debug, PartialEq)]
pub struct LightningFlash {
    next_roll_ms: f64,
    lit_until_ms: f64,
}

impl LightningFlash {
    pub fn new(now_ms: f64) -> Self {
        Self {
            next_roll_ms: now_ms + FLASH_INTERVAL_MS,
            lit_until_ms: f64::NEG_INFINITY,
        }
    }

    /// Advance to `now_ms` and report whether the flash is lit.
    pub fn tick<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        while now_ms >= self.next_roll_ms {
            if rng.gen::<f32>() > FLASH_THRESHOLD {
                self.lit_until_ms = self.next_roll_ms + FLASH_DURATION_MS;
            }
            self.next_roll_ms += FLASH_INTERVAL_MS;
        }
        now_ms < self.lit_until_ms
    }
}

/// Decoration state for the page currently shown.
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    motif: Option<Motif>,
    flash: Option<LightningFlash>,
}

impl Overlay {
    pub fn new(motif: Option<Motif>, now_ms: f64) -> Self {
        Self {
            motif,
            flash: (motif == Some(Motif::Lightning)).then(|| LightningFlash::new(now_ms)),
        }
    }

    pub fn motif(&self) -> Option<Motif> {
        self.motif
    }

    /// Root class, e.g. `theme-effects theme-water`; `None` on the cover.
    pub fn root_class(&self) -> Option<String> {
        self.motif.map(|m| format!("theme-effects theme-{m}"))
    }

    pub fn layers(&self) -> &'static [&'static str] {
        self.motif.map(layers).unwrap_or(&[])
    }

    /// Whether the storm flash is lit; always false outside the lightning motif.
    pub fn tick<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        self.flash
            .as_mut()
            .map_or(false, |flash| flash.tick(now_ms, rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn test_every_motif_has_layers() {
        for m in Motif::ALL {
            assert!(!layers(m).is_empty(), "{m} has no layers");
        }
    }

    #[test]
    fn test_flash_lights_on_high_roll() {
        // u32::MAX-ish output maps to a roll just under 1.0
        let mut high = StepRng::new(u64::MAX, 0);
        let mut flash = LightningFlash::new(0.0);
        assert!(!flash.tick(2999.0, &mut high));
        assert!(flash.tick(3000.0, &mut high));
        assert!(flash.tick(3149.0, &mut high));
        assert!(!flash.tick(3150.0, &mut high));
    }

    #[test]
    fn test_flash_stays_dark_on_low_roll() {
        let mut low = StepRng::new(0, 0);
        let mut flash = LightningFlash::new(0.0);
        for t in (0..30_000).step_by(50) {
            assert!(!flash.tick(t as f64, &mut low));
        }
    }

    #[test]
    fn test_overlay_inert_outside_lightning() {
        let mut high = StepRng::new(u64::MAX, 0);
        let mut overlay = Overlay::new(Some(Motif::Water), 0.0);
        assert!(!overlay.tick(3000.0, &mut high));
        assert_eq!(overlay.root_class().as_deref(), Some("theme-effects theme-water"));

        let cover = Overlay::new(None, 0.0);
        assert!(cover.layers().is_empty());
        assert_eq!(cover.root_class(), None);
    }
}

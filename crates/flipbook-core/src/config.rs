/// Timing and gesture settings for the navigation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BookConfig {
    /// How long a page flip animates before the target page becomes current.
    pub settle_delay_ms: f64,
    /// Minimum horizontal travel for a touch drag to count as a swipe.
    pub swipe_threshold: f32,
    /// Duration of the background/accent cross-fade.
    pub theme_fade_ms: f64,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 800.0,
            swipe_threshold: 50.0,
            theme_fade_ms: 1200.0,
        }
    }
}

/// Simulation constants shared by every motif.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Opacity change per frame, multiplied by the particle's fade direction.
    pub fade_step: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Distance past an edge before a particle is moved to the opposite side.
    pub wrap_margin: f32,
    /// Full width of the initial velocity distribution, centred on zero.
    pub base_speed: f32,
    pub size_min: f32,
    pub size_range: f32,
    /// Full width of the angle speed distribution, centred on zero.
    pub angle_speed: f32,
    pub glow_blur: f32,
    pub bolt_glow_blur: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            fade_step: 0.003,
            opacity_min: 0.1,
            opacity_max: 0.8,
            wrap_margin: 10.0,
            base_speed: 0.5,
            size_min: 1.0,
            size_range: 3.0,
            angle_speed: 0.02,
            glow_blur: 8.0,
            bolt_glow_blur: 10.0,
        }
    }
}

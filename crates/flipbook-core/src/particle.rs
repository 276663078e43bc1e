use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::color::Rgba;
use crate::config::ParticleConfig;
use crate::motif::{Motif, Shape};
use crate::surface::{Surface, SurfaceSize};

/// Number of concentric rings drawn for an echo particle.
const ECHO_RINGS: usize = 3;
/// Vertical length of a lightning bolt segment.
const BOLT_LENGTH: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub size: f32,
    pub velocity: Vec2,
    pub opacity: f32,
    /// `1.0` while brightening, `-1.0` while fading.
    pub fade_direction: f32,
    /// Phase driving the sinusoidal sway of several motifs.
    pub angle: f32,
    pub angle_speed: f32,
    pub motif: Motif,
    pub color: Rgba,
}

impl Particle {
    /// Scatter a new particle uniformly over the surface.
    pub fn spawn<R: Rng>(motif: Motif, size: SurfaceSize, cfg: &ParticleConfig, rng: &mut R) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * size.width, rng.gen::<f32>() * size.height);
        let radius = rng.gen::<f32>() * cfg.size_range + cfg.size_min;
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * cfg.base_speed,
            (rng.gen::<f32>() - 0.5) * cfg.base_speed,
        );
        // Starting opacity stays inside the pulse band.
        let opacity = (rng.gen::<f32>() * 0.5 + 0.3).clamp(cfg.opacity_min, cfg.opacity_max);
        let fade_direction = if rng.gen::<f32>() > 0.5 { 1.0 } else { -1.0 };
        let angle = rng.gen::<f32>() * TAU;
        let angle_speed = (rng.gen::<f32>() - 0.5) * cfg.angle_speed;

        let mut particle = Self {
            position,
            size: radius,
            velocity,
            opacity,
            fade_direction,
            angle,
            angle_speed,
            motif,
            color: motif.palette().primary.with_alpha(opacity),
        };
        particle.color = particle.current_color(rng);
        particle
    }

    /// Advance one frame: motion, phase, opacity pulse, wraparound, colour.
    pub fn update<R: Rng>(&mut self, bounds: SurfaceSize, cfg: &ParticleConfig, rng: &mut R) {
        self.apply_motion();
        self.angle += self.angle_speed;
        self.pulse(cfg);
        self.wrap(bounds, cfg.wrap_margin);
        self.color = self.current_color(rng);
    }

    fn apply_motion(&mut self) {
        let sway = self.angle.sin();
        let p = &mut self.position;
        match self.motif {
            Motif::Mountain => {
                // mist sinks regardless of the seeded vertical sign
                p.y += self.velocity.y.abs() * 0.3;
                p.x += sway * 0.2;
            }
            Motif::Water => {
                p.y += sway * 0.5;
                p.x += self.velocity.x;
            }
            Motif::Feather => {
                p.y -= 0.5;
                p.x += sway * 0.8;
            }
            Motif::Echo => {
                self.size = 2.0 + sway;
                *p += self.velocity * 0.3;
            }
            Motif::Lightning => {
                *p += self.velocity * 2.0;
            }
            Motif::Aurora => {
                p.y += sway * 0.3;
                p.x += self.angle.cos() * 0.3;
            }
            Motif::Golden => {
                p.y -= 0.3;
                p.x += sway * 0.5;
            }
        }
    }

    fn pulse(&mut self, cfg: &ParticleConfig) {
        self.opacity = (self.opacity + self.fade_direction * cfg.fade_step)
            .clamp(cfg.opacity_min, cfg.opacity_max);
        if self.opacity <= cfg.opacity_min || self.opacity >= cfg.opacity_max {
            // Point the pulse back into the band.
            self.fade_direction = if self.opacity <= cfg.opacity_min { 1.0 } else { -1.0 };
        }
    }

    fn wrap(&mut self, bounds: SurfaceSize, margin: f32) {
        let p = &mut self.position;
        if p.y < -margin {
            p.y = bounds.height + margin;
        } else if p.y > bounds.height + margin {
            p.y = -margin;
        }
        if p.x < -margin {
            p.x = bounds.width + margin;
        } else if p.x > bounds.width + margin {
            p.x = -margin;
        }
    }

    /// Motif hue at the current opacity; aurora picks one of its two hues
    /// at random on every call.
    pub fn current_color<R: Rng>(&self, rng: &mut R) -> Rgba {
        let palette = self.motif.palette();
        let rgb = match palette.secondary {
            Some(alt) if rng.gen::<f32>() <= 0.5 => alt,
            _ => palette.primary,
        };
        rgb.with_alpha(self.opacity)
    }

    pub fn draw<S: Surface + ?Sized, R: Rng>(&self, surface: &mut S, cfg: &ParticleConfig, rng: &mut R) {
        match self.motif.shape() {
            Shape::GlowDot => {
                surface.fill_circle(self.position, self.size, self.color, cfg.glow_blur);
            }
            Shape::Feather => {
                let radii = Vec2::new(self.size * 2.0, self.size * 4.0);
                surface.fill_ellipse(self.position, radii, self.angle, self.color);
            }
            Shape::Rings => {
                for i in 0..ECHO_RINGS {
                    let color = self.color.with_alpha(self.opacity / (i + 1) as f32);
                    surface.stroke_ring(self.position, self.size + i as f32 * 2.0, color, 1.0);
                }
            }
            Shape::Bolt => {
                let jitter = rng.gen::<f32>() * BOLT_LENGTH - BOLT_LENGTH / 2.0;
                let to = self.position + Vec2::new(jitter, BOLT_LENGTH);
                surface.stroke_line(
                    self.position,
                    to,
                    self.color,
                    self.size * 0.5,
                    cfg.bolt_glow_blur,
                );
            }
        }
    }
}

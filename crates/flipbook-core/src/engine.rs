//! Per-motif particle field with an explicit frame-loop lifecycle.
//!
//! `mount` seeds a fresh pool and hands out a [`LoopToken`]; the host
//! schedules display-synchronised callbacks and calls [`ParticleEngine::frame`]
//! with that token. Mounting again or unmounting invalidates the token, so a
//! callback belonging to an earlier loop can neither draw nor reschedule.

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleConfig;
use crate::motif::Motif;
use crate::particle::Particle;
use crate::surface::{Surface, SurfaceSize};

/// Identifies one mounted loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopToken(u64);

struct Field {
    token: LoopToken,
    motif: Motif,
    bounds: SurfaceSize,
    particles: Vec<Particle>,
}

pub struct ParticleEngine<R = SmallRng> {
    pub config: ParticleConfig,
    rng: R,
    field: Option<Field>,
    generation: u64,
    frames: u64,
    closed: bool,
}

/// What [`ParticleEngine::follow`] did to the running loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Follow {
    /// Already showing the requested motif, or closed.
    Unchanged,
    /// A new loop was started for the requested motif.
    Started(LoopToken),
    /// The previous loop was released and nothing replaced it.
    Stopped,
}

impl ParticleEngine<SmallRng> {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    pub fn seeded(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticleEngine<R> {
    /// Engine drawing all of its randomness from `rng`.
    pub fn with_rng(config: ParticleConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            field: None,
            generation: 0,
            frames: 0,
            closed: false,
        }
    }

    /// Seed a pool for `motif` and start a new loop, releasing any previous
    /// one first. Returns `None` and stays inert when `size` is unusable.
    pub fn mount(&mut self, motif: Motif, size: SurfaceSize) -> Option<LoopToken> {
        self.unmount();
        if self.closed {
            debug!("engine: closed, ignoring mount motif={}", motif);
            return None;
        }
        if !size.is_usable() {
            warn!(
                "engine: surface unavailable ({}x{}), motif={} stays inert",
                size.width, size.height, motif
            );
            return None;
        }

        self.generation += 1;
        let token = LoopToken(self.generation);
        let particles = (0..motif.pool_size())
            .map(|_| Particle::spawn(motif, size, &self.config, &mut self.rng))
            .collect::<Vec<_>>();
        debug!(
            "engine: mounted motif={} particles={} surface={}x{} loop={}",
            motif,
            particles.len(),
            size.width,
            size.height,
            token.0
        );
        self.field = Some(Field {
            token,
            motif,
            bounds: size,
            particles,
        });
        Some(token)
    }

    /// Stop the active loop and drop its pool.
    pub fn unmount(&mut self) {
        if let Some(field) = self.field.take() {
            debug!(
                "engine: unmounted motif={} loop={} frames={}",
                field.motif, field.token.0, self.frames
            );
            self.frames = 0;
        }
    }

    /// Release the loop for good. Every later mount, resize or follow is a
    /// no-op, so callbacks that outlive their host cannot restart drawing.
    pub fn close(&mut self) {
        self.unmount();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Bring the loop in line with the page that just settled: keep it when
    /// the motif is unchanged, remount on a new motif, stop it on the cover
    /// or when there is no surface to draw on.
    pub fn follow(&mut self, motif: Option<Motif>, size: Option<SurfaceSize>) -> Follow {
        if self.closed || self.motif() == motif {
            return Follow::Unchanged;
        }
        match (motif, size) {
            (Some(motif), Some(size)) => match self.mount(motif, size) {
                Some(token) => Follow::Started(token),
                None => Follow::Stopped,
            },
            _ => {
                self.unmount();
                Follow::Stopped
            }
        }
    }

    /// Re-seed the active motif for a new surface size. Returns the new
    /// token, `None` when nothing is mounted or the size is unusable.
    pub fn resize(&mut self, size: SurfaceSize) -> Option<LoopToken> {
        let motif = self.field.as_ref()?.motif;
        self.mount(motif, size)
    }

    /// Run one frame of the loop identified by `token`. Returns whether the
    /// host should schedule another frame for it.
    pub fn frame<S: Surface + ?Sized>(&mut self, token: LoopToken, surface: &mut S) -> bool {
        let Some(field) = self.field.as_mut().filter(|f| f.token == token) else {
            return false;
        };
        if surface.size().is_none() {
            warn!("engine: surface lost, stopping loop={}", token.0);
            return false;
        }

        surface.clear();
        for particle in &mut field.particles {
            particle.update(field.bounds, &self.config, &mut self.rng);
            particle.draw(surface, &self.config, &mut self.rng);
        }
        self.frames += 1;
        true
    }

    pub fn is_active(&self) -> bool {
        self.field.is_some()
    }

    /// Number of loops allowed to run: zero or one.
    pub fn live_loops(&self) -> usize {
        usize::from(self.field.is_some())
    }

    pub fn token(&self) -> Option<LoopToken> {
        self.field.as_ref().map(|f| f.token)
    }

    pub fn motif(&self) -> Option<Motif> {
        self.field.as_ref().map(|f| f.motif)
    }

    pub fn bounds(&self) -> Option<SurfaceSize> {
        self.field.as_ref().map(|f| f.bounds)
    }

    /// Live pool, empty when unmounted.
    pub fn particles(&self) -> &[Particle] {
        self.field
            .as_ref()
            .map(|f| f.particles.as_slice())
            .unwrap_or(&[])
    }

    /// Frames run by the current loop.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

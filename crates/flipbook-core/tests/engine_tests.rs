use flipbook_core::config::{BookConfig, ParticleConfig};
use flipbook_core::surface::{DrawCommand, DrawList, SurfaceSize};
use flipbook_core::{Catalog, Follow, Motif, Navigator, ParticleEngine};
use glam::Vec2;
use rand::rngs::mock::StepRng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const W: f32 = 320.0;
const H: f32 = 240.0;

fn size() -> SurfaceSize {
    SurfaceSize::new(W, H)
}

/// Engine whose every random draw is 0.0: particles start at the origin,
/// fading, with angle 0 and a small negative angle speed.
fn zero_engine() -> ParticleEngine<StepRng> {
    ParticleEngine::with_rng(ParticleConfig::default(), StepRng::new(0, 0))
}

fn run(engine: &mut ParticleEngine<impl rand::Rng>, frames: usize, surface: &mut DrawList) {
    let token = engine.token().expect("mounted");
    for _ in 0..frames {
        assert!(engine.frame(token, surface));
    }
}

// ---------------------------------------------------------------------------
// 1. Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_mount_seeds_pool_per_motif() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 1);
    for motif in Motif::ALL {
        engine.mount(motif, size()).expect("usable surface");
        assert_eq!(engine.particles().len(), motif.pool_size(), "{motif}");
        assert!(engine.particles().iter().all(|p| p.motif == motif));
        assert_eq!(engine.motif(), Some(motif));
    }
}

#[test]
fn test_remount_leaves_single_loop() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 2);
    let mut surface = DrawList::new(W, H);

    let a = engine.mount(Motif::Water, size()).unwrap();
    let b = engine.mount(Motif::Aurora, size()).unwrap();
    assert_ne!(a, b);
    assert_eq!(engine.live_loops(), 1);
    assert_eq!(engine.particles().len(), Motif::Aurora.pool_size());
    assert!(engine.particles().iter().all(|p| p.motif == Motif::Aurora));

    // the stale callback neither draws nor reschedules
    assert!(!engine.frame(a, &mut surface));
    assert!(surface.commands.is_empty());
    assert!(engine.frame(b, &mut surface));
    assert!(!surface.commands.is_empty());
}

#[test]
fn test_unmount_releases_everything() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 3);
    let mut surface = DrawList::new(W, H);
    let token = engine.mount(Motif::Echo, size()).unwrap();
    engine.frame(token, &mut surface);

    engine.unmount();
    assert!(!engine.is_active());
    assert_eq!(engine.live_loops(), 0);
    assert!(engine.particles().is_empty());
    assert_eq!(engine.frames(), 0);
    assert!(!engine.frame(token, &mut surface));

    // a later mount never sees the old pool or its frame count
    let fresh = engine.mount(Motif::Echo, size()).unwrap();
    assert_ne!(fresh, token);
    assert_eq!(engine.frames(), 0);
    assert_eq!(engine.particles().len(), 25);
}

#[test]
fn test_unusable_surface_is_inert() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 4);
    assert_eq!(engine.mount(Motif::Golden, SurfaceSize::new(0.0, 600.0)), None);
    assert!(!engine.is_active());
    assert!(engine.particles().is_empty());

    let token = engine.mount(Motif::Golden, size()).unwrap();
    let mut lost = DrawList::unavailable();
    assert!(!engine.frame(token, &mut lost));
    assert!(lost.commands.is_empty());
}

#[test]
fn test_resize_reseeds_active_motif() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 5);
    assert_eq!(engine.resize(size()), None);

    let old = engine.mount(Motif::Feather, size()).unwrap();
    let new = engine.resize(SurfaceSize::new(1024.0, 768.0)).unwrap();
    assert_ne!(old, new);
    assert_eq!(engine.motif(), Some(Motif::Feather));
    assert_eq!(engine.bounds(), Some(SurfaceSize::new(1024.0, 768.0)));
    assert_eq!(engine.live_loops(), 1);
}

#[test]
fn test_follow_tracks_settled_page() {
    let catalog = Catalog::reference();
    let mut nav = Navigator::for_catalog(&catalog, &BookConfig::default());
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 6);

    // cover: nothing to run
    assert_eq!(engine.follow(nav.active_motif(&catalog), Some(size())), Follow::Unchanged);
    assert_eq!(engine.live_loops(), 0);

    nav.advance(0.0).unwrap();
    nav.tick(800.0).unwrap();
    let Follow::Started(first) = engine.follow(nav.active_motif(&catalog), Some(size())) else {
        panic!("page 1 should start a loop");
    };
    assert_eq!(engine.motif(), Some(Motif::Mountain));

    // same motif again keeps the running loop
    assert_eq!(engine.follow(Some(Motif::Mountain), Some(size())), Follow::Unchanged);
    assert_eq!(engine.token(), Some(first));

    // no surface: the old loop is released rather than left running
    assert_eq!(engine.follow(Some(Motif::Water), None), Follow::Stopped);
    assert_eq!(engine.live_loops(), 0);

    nav.jump_to(0, 1000.0).unwrap();
    nav.tick(1800.0).unwrap();
    engine.mount(Motif::Water, size()).unwrap();
    assert_eq!(engine.follow(nav.active_motif(&catalog), Some(size())), Follow::Stopped);
    assert!(!engine.is_active());
}

#[test]
fn test_settle_after_close_stays_stopped() {
    let catalog = Catalog::reference();
    let mut nav = Navigator::for_catalog(&catalog, &BookConfig::default());
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 7);
    let mut surface = DrawList::new(W, H);

    nav.advance(0.0).unwrap();
    nav.tick(800.0).unwrap();
    let Follow::Started(token) = engine.follow(nav.active_motif(&catalog), Some(size())) else {
        panic!("page 1 should start a loop");
    };

    // a flip is in flight when the host tears down
    nav.advance(1000.0).unwrap();
    engine.close();
    assert!(engine.is_closed());
    assert_eq!(engine.live_loops(), 0);

    // the settle fires afterwards and the page changes motif
    assert_eq!(nav.complete_pending(), Some(2));
    assert_eq!(nav.active_motif(&catalog), Some(Motif::Water));
    assert_eq!(engine.follow(nav.active_motif(&catalog), Some(size())), Follow::Unchanged);
    assert_eq!(engine.live_loops(), 0);
    assert!(engine.particles().is_empty());
    assert!(!engine.frame(token, &mut surface));
    assert!(surface.commands.is_empty());

    // nor can a direct mount or resize bring it back
    assert_eq!(engine.mount(Motif::Water, size()), None);
    assert_eq!(engine.resize(size()), None);
    assert_eq!(engine.live_loops(), 0);
}

// ---------------------------------------------------------------------------
// 2. Invariants over long runs
// ---------------------------------------------------------------------------

#[test]
fn test_opacity_stays_in_band() {
    let cfg = ParticleConfig::default();
    for (seed, motif) in Motif::ALL.into_iter().enumerate() {
        let mut engine = ParticleEngine::seeded(cfg.clone(), seed as u64);
        let mut surface = DrawList::new(W, H);
        let token = engine.mount(motif, size()).unwrap();
        for frame in 0..2_000 {
            engine.frame(token, &mut surface);
            for p in engine.particles() {
                assert!(
                    p.opacity >= cfg.opacity_min && p.opacity <= cfg.opacity_max,
                    "{motif} frame {frame}: opacity {} out of band",
                    p.opacity
                );
                assert_eq!(p.color.a, p.opacity);
            }
            surface.commands.clear();
        }
    }
}

#[test]
fn test_positions_stay_within_wrap_margin() {
    let cfg = ParticleConfig::default();
    let m = cfg.wrap_margin;
    for (seed, motif) in Motif::ALL.into_iter().enumerate() {
        let mut engine = ParticleEngine::seeded(cfg.clone(), 100 + seed as u64);
        // small surface so every motif wraps many times
        let bounds = SurfaceSize::new(60.0, 40.0);
        let mut surface = DrawList::new(bounds.width, bounds.height);
        let token = engine.mount(motif, bounds).unwrap();
        for frame in 0..3_000 {
            engine.frame(token, &mut surface);
            for p in engine.particles() {
                let Vec2 { x, y } = p.position;
                assert!(
                    x >= -m && x <= bounds.width + m && y >= -m && y <= bounds.height + m,
                    "{motif} frame {frame}: ({x}, {y}) escaped"
                );
            }
            surface.commands.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Deterministic motion and wraparound
// ---------------------------------------------------------------------------

#[test]
fn test_zero_rng_initial_state() {
    let mut engine = zero_engine();
    engine.mount(Motif::Water, size()).unwrap();
    let p = &engine.particles()[0];
    assert_eq!(p.position, Vec2::ZERO);
    assert_eq!(p.size, 1.0);
    assert_eq!(p.velocity, Vec2::new(-0.25, -0.25));
    assert_eq!(p.opacity, 0.3);
    assert_eq!(p.fade_direction, -1.0);
    assert_eq!(p.angle, 0.0);
    assert_eq!(p.angle_speed, -0.01);
}

#[test]
fn test_feather_rises_and_wraps_to_bottom() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Feather, size()).unwrap();

    run(&mut engine, 20, &mut surface);
    assert_eq!(engine.particles()[0].position.y, -10.0);

    run(&mut engine, 1, &mut surface);
    assert_eq!(engine.particles()[0].position.y, H + 10.0);
}

#[test]
fn test_lightning_moves_at_double_speed() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Lightning, size()).unwrap();
    run(&mut engine, 4, &mut surface);
    assert_eq!(engine.particles()[0].position, Vec2::new(-2.0, -2.0));
}

#[test]
fn test_lateral_wrap_to_opposite_edge() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Lightning, size()).unwrap();
    // -0.5 per frame: at -10.0 after 20 frames, wraps on the 21st
    run(&mut engine, 21, &mut surface);
    let p = engine.particles()[0].position;
    assert_eq!(p.x, W + 10.0);
    assert_eq!(p.y, H + 10.0);
}

#[test]
fn test_mountain_drifts_down() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Mountain, size()).unwrap();
    run(&mut engine, 10, &mut surface);
    assert!(engine.particles()[0].position.y > 0.0);
}

#[test]
fn test_opacity_turns_at_floor() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Golden, size()).unwrap();
    // 0.3 down to 0.1 at 0.003 per frame takes ~67 frames
    run(&mut engine, 80, &mut surface);
    let p = &engine.particles()[0];
    assert_eq!(p.fade_direction, 1.0);
    assert!(p.opacity > 0.1 && p.opacity < 0.2);
}

// ---------------------------------------------------------------------------
// 4. Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_frame_clears_then_draws_each_particle() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 9);
    let mut surface = DrawList::new(W, H);
    let token = engine.mount(Motif::Water, size()).unwrap();
    engine.frame(token, &mut surface);
    assert_eq!(surface.commands[0], DrawCommand::Clear);
    let frame = surface.last_frame();
    assert_eq!(frame.len(), 25);
    assert!(frame
        .iter()
        .all(|c| matches!(c, DrawCommand::Circle { glow, .. } if *glow == 8.0)));
}

#[test]
fn test_echo_draws_three_fading_rings() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Echo, size()).unwrap();
    run(&mut engine, 1, &mut surface);

    let frame = surface.last_frame();
    assert_eq!(frame.len(), 25 * 3);
    let p = &engine.particles()[0];
    for (i, cmd) in frame[..3].iter().enumerate() {
        let DrawCommand::Ring { radius, color, .. } = cmd else {
            panic!("expected ring, got {cmd:?}");
        };
        assert!((radius - (p.size + i as f32 * 2.0)).abs() < 1e-6);
        assert!((color.a - p.opacity / (i + 1) as f32).abs() < 1e-6);
    }
}

#[test]
fn test_feather_and_bolt_shapes() {
    let mut engine = zero_engine();
    let mut surface = DrawList::new(W, H);
    engine.mount(Motif::Feather, size()).unwrap();
    run(&mut engine, 1, &mut surface);
    let DrawCommand::Ellipse { radii, rotation, .. } = &surface.last_frame()[0] else {
        panic!("feather should draw an ellipse");
    };
    assert_eq!(*radii, Vec2::new(2.0, 4.0));
    assert_eq!(*rotation, engine.particles()[0].angle);

    engine.mount(Motif::Lightning, size()).unwrap();
    run(&mut engine, 1, &mut surface);
    let DrawCommand::Line { from, to, line_width, .. } = &surface.last_frame()[0] else {
        panic!("lightning should draw a line");
    };
    assert_eq!(to.y - from.y, 10.0);
    assert!((to.x - from.x).abs() <= 5.0);
    assert_eq!(*line_width, 0.5);
}

#[test]
fn test_aurora_uses_both_hues() {
    let mut engine = ParticleEngine::seeded(ParticleConfig::default(), 11);
    let mut surface = DrawList::new(W, H);
    let token = engine.mount(Motif::Aurora, size()).unwrap();
    let palette = Motif::Aurora.palette();
    let mut seen = (false, false);
    for _ in 0..20 {
        engine.frame(token, &mut surface);
        for p in engine.particles() {
            seen.0 |= p.color.rgb == palette.primary;
            seen.1 |= Some(p.color.rgb) == palette.secondary;
        }
    }
    assert!(seen.0 && seen.1, "aurora should alternate hues: {seen:?}");
}

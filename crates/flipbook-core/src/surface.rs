//! Drawing-surface abstraction the particle engine renders onto.

use glam::Vec2;

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero or negative extent cannot be drawn on.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Minimal 2D drawing API. Implementations decide how glow is rendered
/// (canvas shadow blur, an extra soft pass, or nothing).
pub trait Surface {
    /// Current extent, `None` when the surface cannot be drawn on.
    fn size(&self) -> Option<SurfaceSize>;
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32);
    /// Ellipse with radii `radii`, rotated by `rotation` radians about `center`.
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Rgba);
    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32, glow: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        glow: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Rgba,
    },
    Ring {
        center: Vec2,
        radius: f32,
        color: Rgba,
        line_width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        line_width: f32,
        glow: f32,
    },
}

/// Headless surface that records what was drawn.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    size: Option<SurfaceSize>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        let size = SurfaceSize::new(width, height);
        Self {
            size: size.is_usable().then_some(size),
            commands: Vec::new(),
        }
    }

    /// A surface whose context could not be obtained.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Commands drawn since the last `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }
}

impl Surface for DrawList {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Rgba) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            rotation,
            color,
        });
    }

    fn stroke_ring(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32, glow: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
            glow,
        });
    }
}

//! The fixed set of visual motifs and their per-motif constants.
//!
//! Every motif-dependent rule (pool size, palette, motion, shape) is a
//! `match` over [`Motif`]; adding a motif means the compiler points at every
//! place that needs a new arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motif {
    Mountain,
    Water,
    Feather,
    Echo,
    Lightning,
    Aurora,
    Golden,
}

/// How a particle of a given motif is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Filled circle with a soft glow.
    GlowDot,
    /// Ellipse rotated along the particle angle.
    Feather,
    /// Three concentric unfilled rings.
    Rings,
    /// Short jittered line segment with glow.
    Bolt,
}

/// One or two hues; the second is only used by motifs that alternate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Option<Rgb>,
}

impl Motif {
    pub const ALL: [Motif; 7] = [
        Motif::Mountain,
        Motif::Water,
        Motif::Feather,
        Motif::Echo,
        Motif::Lightning,
        Motif::Aurora,
        Motif::Golden,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Motif::Mountain => "mountain",
            Motif::Water => "water",
            Motif::Feather => "feather",
            Motif::Echo => "echo",
            Motif::Lightning => "lightning",
            Motif::Aurora => "aurora",
            Motif::Golden => "golden",
        }
    }

    /// Number of particles seeded when the engine mounts for this motif.
    pub fn pool_size(self) -> usize {
        match self {
            Motif::Lightning => 15,
            Motif::Aurora => 30,
            _ => 25,
        }
    }

    pub fn palette(self) -> Palette {
        let single = |r, g, b| Palette {
            primary: Rgb::new(r, g, b),
            secondary: None,
        };
        match self {
            Motif::Mountain => single(100, 100, 120),
            Motif::Water => single(100, 180, 220),
            Motif::Feather => single(255, 255, 255),
            Motif::Echo => single(158, 158, 184),
            Motif::Lightning => single(200, 200, 255),
            Motif::Aurora => Palette {
                primary: Rgb::new(74, 255, 255),
                secondary: Some(Rgb::new(0, 255, 136)),
            },
            Motif::Golden => single(255, 215, 0),
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Motif::Feather => Shape::Feather,
            Motif::Echo => Shape::Rings,
            Motif::Lightning => Shape::Bolt,
            Motif::Mountain | Motif::Water | Motif::Aurora | Motif::Golden => Shape::GlowDot,
        }
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Motif {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Motif::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_sizes() {
        assert_eq!(Motif::Lightning.pool_size(), 15);
        assert_eq!(Motif::Aurora.pool_size(), 30);
        for m in [Motif::Mountain, Motif::Water, Motif::Feather, Motif::Echo, Motif::Golden] {
            assert_eq!(m.pool_size(), 25, "{m} pool size");
        }
    }

    #[test]
    fn test_name_round_trip() {
        for m in Motif::ALL {
            assert_eq!(m.as_str().parse::<Motif>(), Ok(m));
        }
        assert!("volcano".parse::<Motif>().is_err());
    }

    #[test]
    fn test_only_aurora_alternates() {
        for m in Motif::ALL {
            assert_eq!(m.palette().secondary.is_some(), m == Motif::Aurora, "{m}");
        }
    }
}

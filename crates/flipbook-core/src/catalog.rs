//! Read-only page catalog: one record per movement page, in display order.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::motif::Motif;
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no tracks")]
    Empty,
    #[error("unknown motif `{0}`")]
    UnknownMotif(String),
    #[error("track {id}: accent `{accent}` is not a #rrggbb colour")]
    InvalidColor { id: u32, accent: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    #[serde(alias = "animationName")]
    pub animation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: u32,
    pub title: String,
    /// Musical key / mode label.
    pub key: String,
    pub duration: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    pub image_url: String,
    pub theme: Theme,
    pub text_style: TextStyle,
    #[serde(alias = "particleType")]
    pub motif: Motif,
}

/// Ordered movement pages. Page `0` is the cover and has no record; page `i`
/// maps to `tracks[i - 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        for track in &tracks {
            if Rgb::from_hex(&track.theme.accent).is_none() {
                return Err(CatalogError::InvalidColor {
                    id: track.id,
                    accent: track.theme.accent.clone(),
                });
            }
        }
        info!("catalog: loaded tracks={}", tracks.len());
        Ok(Self { tracks })
    }

    /// Parse a JSON array of track records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let tracks = records
            .into_iter()
            .map(|record| {
                check_motif(&record)?;
                Ok(serde_json::from_value::<Track>(record)?)
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Self::new(tracks)
    }

    /// Number of movement pages, `N`.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Record shown on `page`, `None` for the cover or past the end.
    pub fn track(&self, page: usize) -> Option<&Track> {
        page.checked_sub(1).and_then(|i| self.tracks.get(i))
    }

    /// The seven-movement album the book was made for.
    pub fn reference() -> Self {
        let tracks = REFERENCE
            .iter()
            .enumerate()
            .map(|(i, row)| Track {
                id: i as u32 + 1,
                title: row.title.to_string(),
                key: row.key.to_string(),
                duration: row.duration.to_string(),
                description: row.description.to_string(),
                lyrics: row.lyrics.map(str::to_string),
                image_url: format!("/images/{}.jpg", i + 1),
                theme: Theme {
                    background: format!(
                        "linear-gradient(135deg, {} 0%, {} 50%, {} 100%)",
                        row.gradient[0], row.gradient[1], row.gradient[2]
                    ),
                    accent: row.accent.to_string(),
                },
                text_style: TextStyle {
                    font_family: format!("'{}', 'Georgia', serif", row.font),
                    animation: row.animation.to_string(),
                },
                motif: row.motif,
            })
            .collect();
        Self { tracks }
    }
}

/// Reject a record whose motif tag names no known motif. Missing or
/// non-string tags are left for the typed decode to report.
fn check_motif(record: &serde_json::Value) -> Result<(), CatalogError> {
    let tag = record
        .get("motif")
        .or_else(|| record.get("particleType"))
        .and_then(serde_json::Value::as_str);
    match tag {
        Some(name) => name
            .parse::<Motif>()
            .map(|_| ())
            .map_err(CatalogError::UnknownMotif),
        None => Ok(()),
    }
}

struct Row {
    title: &'static str,
    key: &'static str,
    duration: &'static str,
    description: &'static str,
    lyrics: Option<&'static str>,
    gradient: [&'static str; 3],
    accent: &'static str,
    font: &'static str,
    animation: &'static str,
    motif: Motif,
}

const REFERENCE: [Row; 7] = [
    Row {
        title: "The Mountain's Shadow",
        key: "D minor",
        duration: "6:00",
        description: "Our opening epic - sets the journey's beginning.",
        lyrics: None,
        gradient: ["#1a1a2e", "#2d3561", "#16213e"],
        accent: "#4a5568",
        font: "Cinzel",
        animation: "mountain-shadow",
        motif: Motif::Mountain,
    },
    Row {
        title: "Rivers Running Backward",
        key: "A minor",
        duration: "5:00",
        description: "About defying natural order, swimming against the current. Flowing orchestral with prominent strings and woodwinds.",
        lyrics: Some("Where the rivers run backward / Up the mountainside / I learned to breathe underwater / With my lungs open wide"),
        gradient: ["#0f2027", "#203a43", "#2c5364"],
        accent: "#4a90a4",
        font: "Merriweather",
        animation: "water-flow",
        motif: Motif::Water,
    },
    Row {
        title: "The Weight of Wings",
        key: "E minor",
        duration: "7:00",
        description: "The burden of potential, learning to fly while carrying stones. Heavy percussion building to soaring violin solos.",
        lyrics: Some("These wings were made of iron / Before they learned to soar / Every feather weighs a lifetime / But I'm stronger than before"),
        gradient: ["#232526", "#414345", "#536976"],
        accent: "#6b7b8c",
        font: "Playfair Display",
        animation: "fire-glow",
        motif: Motif::Feather,
    },
    Row {
        title: "Echoes in the Void",
        key: "B minor",
        duration: "4:00",
        description: "Finding your voice in emptiness, creating something from nothing. Minimalist start, building layers of vocal harmonies.",
        lyrics: Some("In the void I found my echo / Teaching me to sing / In the silence, I'm the thunder / In the nothing, everything"),
        gradient: ["#1e1e2e", "#2e2e4e", "#3e3e5e"],
        accent: "#5e5e7e",
        font: "Crimson Text",
        animation: "echo-pulse",
        motif: Motif::Echo,
    },
    Row {
        title: "The Storm's Eye",
        key: "F# minor",
        duration: "8:00",
        description: "The calm within chaos, finding peace in turmoil. Full symphonic power, with quiet centered interlude.",
        lyrics: Some("In the eye of every storm / There's a chapel made of rain / Where the lightning serves as candles / And the thunder calls my name"),
        gradient: ["#1c1c2e", "#363654", "#4a4a6a"],
        accent: "#6a6a8a",
        font: "EB Garamond",
        animation: "lightning-strike",
        motif: Motif::Lightning,
    },
    Row {
        title: "Beneath the Northern Lights",
        key: "G minor",
        duration: "5:00",
        description: "Wonder in darkness, finding magic in the coldest night. Ethereal, with choir and shimmering strings.",
        lyrics: Some("Where the world ends in winter / The sky begins to dance / Aurora tells the story / Of the stars' second chance"),
        gradient: ["#0a2e38", "#1a4d5e", "#2a6d7e"],
        accent: "#3a8d9e",
        font: "Libre Baskerville",
        animation: "aurora-shimmer",
        motif: Motif::Aurora,
    },
    Row {
        title: "The Summit's Secret",
        key: "D minor to D major",
        duration: "9:00",
        description: "The finale - discovering the journey was the destination. Reprises themes from all previous tracks, ends in major key triumph.",
        lyrics: Some("At the summit there's no treasure / Just the person you became / Every scar a constellation / Every loss a sacred flame"),
        gradient: ["#2c1a1e", "#4a3a3e", "#6a5a5e"],
        accent: "#8a7a7e",
        font: "Cormorant Garamond",
        animation: "golden-triumph",
        motif: Motif::Golden,
    },
];

//! Read-only view model handed to the presentation shell.

use serde::Serialize;

use crate::catalog::{Catalog, Track};
use crate::navigation::{Direction, Navigator};
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDot {
    pub page: usize,
    pub title: String,
    pub active: bool,
    pub cover: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a> {
    pub current_page: usize,
    pub page_count: usize,
    pub is_cover: bool,
    pub track: Option<&'a Track>,
    /// `"{current} / {N}"`.
    pub indicator: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub is_transitioning: bool,
    /// `flipping-forward` / `flipping-backward` while a flip is in flight.
    pub flip_class: Option<&'static str>,
    pub theme: Theme,
    pub dots: Vec<PageDot>,
}

impl<'a> PageView<'a> {
    pub fn build(catalog: &'a Catalog, nav: &Navigator) -> Self {
        let current = nav.current_page();
        let count = nav.page_count();
        let idle = !nav.is_transitioning();
        let flip_class = nav.pending().map(|t| match t.direction {
            Direction::Forward => "flipping-forward",
            Direction::Backward => "flipping-backward",
        });
        let dots = (0..=count)
            .map(|page| PageDot {
                page,
                title: if page == 0 {
                    "Cover".to_string()
                } else {
                    format!("Track {page}")
                },
                active: page == current,
                cover: page == 0,
            })
            .collect();

        Self {
            current_page: current,
            page_count: count,
            is_cover: current == 0,
            track: catalog.track(current),
            indicator: format!("{current} / {count}"),
            prev_enabled: current > 0 && idle,
            next_enabled: current < count && idle,
            is_transitioning: !idle,
            flip_class,
            theme: nav.theme(catalog),
            dots,
        }
    }
}

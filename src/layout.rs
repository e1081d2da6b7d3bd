// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Horizontal layout of carousel items.
//!
//! Known languages (those with an icon) are always placed before unknown
//! ones; relative order inside each group follows the filtered input. Every
//! item is followed by the profile gap, so the total width includes one
//! trailing gap and the duplicated copy starts exactly one gap after the last
//! item.

use rand::Rng;
use tracing::debug;

use crate::{icons::IconRegistry, profile::ProfileSpec};

/// Visual representation of a single language.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub enum ItemKind
{
    /// Language rendered as an icon image.
    Known
    {
        /// Icon reference from the registry.
        icon: String,
    },
    /// Language rendered as a coloured text badge.
    Unknown
    {
        /// Fill colour drawn from the profile palette.
        color: &'static str,
    },
}

/// One positioned unit of the carousel.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct LayoutItem
{
    /// Language name, also used as the badge label.
    pub language: String,
    /// Icon or badge presentation.
    pub kind:     ItemKind,
    /// Horizontal offset inside one copy of the sequence.
    pub x:        u32,
    /// Width occupied on the canvas, excluding the trailing gap.
    pub width:    u32,
}

impl LayoutItem
{
    /// Returns `true` for icon items.
    pub fn is_known(&self,) -> bool
    {
        matches!(self.kind, ItemKind::Known { .. })
    }
}

/// Canvas dimensions and animation timing derived from the items.
#[derive(Debug, Clone, Copy, PartialEq,)]
pub struct CanvasMetrics
{
    /// Width of one copy of the sequence, trailing gap included.
    pub total_width:   u32,
    /// Fixed canvas height.
    pub height:        u32,
    /// Seconds for one full scroll cycle.
    pub duration_secs: f64,
}

/// Positioned items plus the metrics the renderer needs.
#[derive(Debug, Clone, PartialEq,)]
pub struct CarouselLayout
{
    /// Items in drawing order.
    pub items:   Vec<LayoutItem,>,
    /// Derived canvas metrics.
    pub metrics: CanvasMetrics,
}

/// Lays out `languages` according to `spec`.
///
/// Badge colours are drawn independently per item from `spec.palette`
/// using `rng`, so adjacent badges may share a colour.
///
/// # Example
///
/// ```
/// use lang_carousel::{IconRegistry, Profile, compute_layout};
///
/// let registry: IconRegistry = [("Go", "https://icons.test/go.svg")].into_iter().collect();
/// let languages = vec!["Brainfuck".to_owned(), "Go".to_owned()];
/// let layout = compute_layout(&languages, &registry, Profile::Compact.spec(), &mut rand::rng());
///
/// assert_eq!(layout.items[0].language, "Go");
/// assert_eq!(layout.items[1].x, 60 + 15);
/// ```
pub fn compute_layout<R,>(
    languages: &[String],
    registry: &IconRegistry,
    spec: &ProfileSpec,
    rng: &mut R,
) -> CarouselLayout
where
    R: Rng,
{
    let (known, unknown,): (Vec<&String,>, Vec<&String,>,) =
        languages.iter().partition(|language| registry.contains(language,),);

    let mut items = Vec::with_capacity(languages.len(),);
    let mut cursor = 0u32;

    for language in known {
        let icon = registry.icon_for(language,).unwrap_or_default().to_owned();
        let width = spec.icon_slot_width();
        items.push(LayoutItem {
            language: language.clone(),
            kind: ItemKind::Known {
                icon,
            },
            x: cursor,
            width,
        },);
        cursor = cursor.saturating_add(width,).saturating_add(spec.gap,);
    }

    for language in unknown {
        let color = spec.palette[rng.random_range(0..spec.palette.len(),)];
        let width = spec.badge_width(language,);
        items.push(LayoutItem {
            language: language.clone(),
            kind: ItemKind::Unknown {
                color,
            },
            x: cursor,
            width,
        },);
        cursor = cursor.saturating_add(width,).saturating_add(spec.gap,);
    }

    let metrics = CanvasMetrics {
        total_width:   cursor,
        height:        spec.height,
        duration_secs: spec.duration_for(items.len(),),
    };

    debug!(
        items = items.len(),
        total_width = metrics.total_width,
        duration = metrics.duration_secs,
        "computed carousel layout"
    );

    CarouselLayout {
        items,
        metrics,
    }
}

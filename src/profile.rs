// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Presentation profiles describing the compiled-in visual constants.
//!
//! Each [`Profile`] resolves to an immutable [`ProfileSpec`] that is passed
//! explicitly into the layout engine and the renderer. None of the values are
//! runtime-configurable.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Fill colours assigned to languages without an icon.
pub const PALETTE: &[&str] = &["#1abc9c", "#e67e22", "#9b59b6", "#3498db", "#e74c3c", "#f1c40f",];

/// Minimum aggregated byte count for a language to appear in the carousel.
pub const MIN_BYTES: u64 = 5000;

/// How the animated SVG is delivered to the embedding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum OutputWrapper
{
    /// SVG wrapped in a fixed-width `overflow:hidden` HTML container.
    HtmlClip
    {
        /// Width of the visible window in pixels.
        viewport_width: u32,
    },
    /// Bare SVG document declaring the doubled content width.
    Svg,
    /// Bare SVG document spanning the full width of its container.
    FullWidthSvg,
}

impl OutputWrapper
{
    /// Content type advertised for documents produced with this wrapper.
    pub const fn content_type(self,) -> &'static str
    {
        match self {
            Self::HtmlClip {
                ..
            } => "text/html; charset=utf-8",
            Self::Svg | Self::FullWidthSvg => "image/svg+xml",
        }
    }
}

/// Size, timing, and wrapping constants for one presentation variant.
#[derive(Debug, Clone, PartialEq,)]
pub struct ProfileSpec
{
    /// Byte threshold applied by the language filter.
    pub min_bytes:          u64,
    /// Fixed canvas height.
    pub height:             u32,
    /// Edge length of the square icon image.
    pub icon_size:          u32,
    /// Extra horizontal room reserved next to each icon.
    pub icon_padding:       u32,
    /// Space between consecutive items.
    pub gap:                u32,
    /// Floor for generated badge widths.
    pub badge_min_width:    u32,
    /// Estimated pixels per label character.
    pub char_width:         u32,
    /// Horizontal padding added to the estimated label width.
    pub badge_padding:      u32,
    /// Badge corner radius.
    pub corner_radius:      u32,
    /// Label font size.
    pub font_size:          u32,
    /// Vertical baseline of badge labels.
    pub label_baseline:     u32,
    /// Lower bound for the scroll duration in seconds.
    pub duration_floor:     f64,
    /// Scroll seconds contributed by each item.
    pub seconds_per_item:   f64,
    /// Colours drawn for generated badges. Never empty.
    pub palette:            &'static [&'static str],
    /// Output wrapping.
    pub wrapper:            OutputWrapper,
}

impl ProfileSpec
{
    /// Width occupied by a known language on the canvas.
    pub const fn icon_slot_width(&self,) -> u32
    {
        self.icon_size + self.icon_padding
    }

    /// Width of a generated badge for `label`.
    ///
    /// Grows linearly with the character count and never drops below
    /// [`badge_min_width`](Self::badge_min_width).
    ///
    /// # Examples
    ///
    /// ```
    /// use lang_carousel::Profile;
    ///
    /// let spec = Profile::Compact.spec();
    /// assert_eq!(spec.badge_width("C"), 55);
    /// assert_eq!(spec.badge_width("Jupyter Notebook"), 16 * 8 + 22);
    /// ```
    pub fn badge_width(&self, label: &str,) -> u32
    {
        let length = u32::try_from(label.chars().count(),).unwrap_or(u32::MAX,);
        let estimated = length.saturating_mul(self.char_width,).saturating_add(self.badge_padding,);
        estimated.max(self.badge_min_width,)
    }

    /// Scroll duration in seconds for `item_count` items.
    pub fn duration_for(&self, item_count: usize,) -> f64
    {
        (item_count as f64 * self.seconds_per_item).max(self.duration_floor,)
    }
}

static COMPACT: ProfileSpec = ProfileSpec {
    min_bytes:        MIN_BYTES,
    height:           55,
    icon_size:        55,
    icon_padding:     5,
    gap:              15,
    badge_min_width:  55,
    char_width:       8,
    badge_padding:    22,
    corner_radius:    10,
    font_size:        11,
    label_baseline:   32,
    duration_floor:   12.0,
    seconds_per_item: 0.9,
    palette:          PALETTE,
    wrapper:          OutputWrapper::HtmlClip {
        viewport_width: 600,
    },
};

static LARGE: ProfileSpec = ProfileSpec {
    min_bytes:        MIN_BYTES,
    height:           80,
    icon_size:        80,
    icon_padding:     5,
    gap:              20,
    badge_min_width:  80,
    char_width:       11,
    badge_padding:    30,
    corner_radius:    14,
    font_size:        16,
    label_baseline:   46,
    duration_floor:   15.0,
    seconds_per_item: 1.2,
    palette:          PALETTE,
    wrapper:          OutputWrapper::Svg,
};

static FULL_WIDTH: ProfileSpec = ProfileSpec {
    min_bytes:        MIN_BYTES,
    height:           64,
    icon_size:        64,
    icon_padding:     6,
    gap:              18,
    badge_min_width:  64,
    char_width:       9,
    badge_padding:    26,
    corner_radius:    12,
    font_size:        13,
    label_baseline:   37,
    duration_floor:   14.0,
    seconds_per_item: 1.0,
    palette:          PALETTE,
    wrapper:          OutputWrapper::FullWidthSvg,
};

/// Selectable presentation variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default,)]
pub enum Profile
{
    /// Compact strip wrapped in a 600px HTML clipping container.
    #[default]
    Compact,
    /// Large standalone SVG.
    Large,
    /// Standalone SVG stretching across its container.
    FullWidth,
}

impl Profile
{
    /// All profiles in declaration order.
    pub const ALL: [Profile; 3] = [Profile::Compact, Profile::Large, Profile::FullWidth,];

    /// Returns the constants backing this profile.
    pub fn spec(self,) -> &'static ProfileSpec
    {
        match self {
            Self::Compact => &COMPACT,
            Self::Large => &LARGE,
            Self::FullWidth => &FULL_WIDTH,
        }
    }

    /// Stable identifier used on the command line and in logs.
    pub const fn as_str(self,) -> &'static str
    {
        match self {
            Self::Compact => "compact",
            Self::Large => "large",
            Self::FullWidth => "full-width",
        }
    }
}

impl fmt::Display for Profile
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

impl FromStr for Profile
{
    type Err = Error;

    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact,),
            "large" => Ok(Self::Large,),
            "full-width" | "full_width" | "full" => Ok(Self::FullWidth,),
            other => Err(Error::validation(format!(
                "unknown profile '{other}', expected compact, large, or full-width"
            ),),),
        }
    }
}

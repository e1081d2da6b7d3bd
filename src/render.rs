// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG markup emission for carousel layouts.
//!
//! The item sequence is written twice, the second copy shifted right by the
//! total width, and a single linear `animateTransform` translates both by
//! `-total_width` per cycle. Because both copies come from the same buffer
//! they are byte-identical, which keeps the loop seamless.

use std::{borrow::Cow, fmt::Write as _};

use crate::{
    layout::{CarouselLayout, ItemKind, LayoutItem},
    profile::{OutputWrapper, ProfileSpec}
};

/// Rendered document together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCarousel {
    /// MIME type matching the profile wrapper.
    pub content_type: &'static str,
    /// Complete markup.
    pub body:         String
}

/// Renders `layout` using the constants and wrapper of `spec`.
///
/// # Example
///
/// ```
/// use lang_carousel::{IconRegistry, Profile, compute_layout, render_layout};
///
/// let spec = Profile::Large.spec();
/// let languages = vec!["Brainfuck".to_owned()];
/// let layout = compute_layout(&languages, &IconRegistry::default(), spec, &mut rand::rng());
/// let rendered = render_layout(&layout, spec);
///
/// assert_eq!(rendered.content_type, "image/svg+xml");
/// assert!(rendered.body.contains(">Brainfuck</text>"));
/// ```
pub fn render_layout(layout: &CarouselLayout, spec: &ProfileSpec) -> RenderedCarousel {
    let sequence = render_sequence(&layout.items, spec);
    let metrics = &layout.metrics;
    let total_width = metrics.total_width;
    let canvas_width = total_width.saturating_mul(2);
    let duration = format_seconds(metrics.duration_secs);

    let mut body = String::with_capacity(sequence.len() * 2 + 512);

    match spec.wrapper {
        OutputWrapper::HtmlClip {
            viewport_width
        } => {
            let _ = writeln!(
                body,
                "<div style=\"width:{viewport_width}px; overflow:hidden; display:inline-block; white-space:nowrap;\">"
            );
            open_svg(&mut body, canvas_width, metrics.height);
        }
        OutputWrapper::Svg => open_svg(&mut body, canvas_width, metrics.height),
        OutputWrapper::FullWidthSvg => {
            let _ = writeln!(
                body,
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"{}\" role=\"img\" aria-label=\"Languages\">",
                metrics.height
            );
        }
    }

    body.push_str("  <g>\n    <g>\n");
    body.push_str(&sequence);
    body.push_str("    </g>\n");
    let _ = writeln!(body, "    <g transform=\"translate({total_width},0)\">");
    body.push_str(&sequence);
    body.push_str("    </g>\n");
    let _ = writeln!(
        body,
        "    <animateTransform attributeName=\"transform\" type=\"translate\" dur=\"{duration}s\" repeatCount=\"indefinite\" keyTimes=\"0;1\" values=\"0,0; -{total_width},0\" calcMode=\"linear\"/>"
    );
    body.push_str("  </g>\n</svg>\n");

    if matches!(spec.wrapper, OutputWrapper::HtmlClip { .. }) {
        body.push_str("</div>\n");
    }

    RenderedCarousel {
        content_type: spec.wrapper.content_type(),
        body
    }
}

fn open_svg(buffer: &mut String, width: u32, height: u32) {
    let _ = writeln!(
        buffer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"Languages\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"xMinYMin\">"
    );
}

fn render_sequence(items: &[LayoutItem], spec: &ProfileSpec) -> String {
    let mut buffer = String::with_capacity(items.len() * 192);

    for item in items {
        let _ = writeln!(buffer, "      <g transform=\"translate({},0)\">", item.x);
        match &item.kind {
            ItemKind::Known {
                icon
            } => {
                let _ = writeln!(
                    buffer,
                    "        <image href=\"{}\" width=\"{size}\" height=\"{size}\"><title>{}</title></image>",
                    escape_xml(icon),
                    escape_xml(&item.language),
                    size = spec.icon_size,
                );
            }
            ItemKind::Unknown {
                color
            } => {
                let _ = writeln!(
                    buffer,
                    "        <rect rx=\"{radius}\" ry=\"{radius}\" width=\"{}\" height=\"{}\" fill=\"{color}\"/>",
                    item.width,
                    spec.height,
                    radius = spec.corner_radius,
                );
                let _ = writeln!(
                    buffer,
                    "        <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"'Segoe UI', 'SF Pro Display', sans-serif\" font-size=\"{}\" fill=\"white\" font-weight=\"bold\">{}</text>",
                    format_half(item.width),
                    spec.label_baseline,
                    spec.font_size,
                    escape_xml(&item.language),
                );
            }
        }
        buffer.push_str("      </g>\n");
    }

    buffer
}

fn format_half(width: u32) -> String {
    if width % 2 == 0 {
        (width / 2).to_string()
    } else {
        format!("{}.5", width / 2)
    }
}

fn format_seconds(seconds: f64) -> String {
    let rounded = (seconds * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

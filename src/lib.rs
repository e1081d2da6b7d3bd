//! Animated language carousels for GitHub profiles.
//!
//! The library aggregates per-repository language statistics for a GitHub
//! account, keeps the languages above a byte threshold, lays them out as
//! icons or coloured badges, and renders a seamlessly looping SVG strip. The
//! [`server`] module exposes the pipeline over HTTP.

mod carousel;
mod config;
mod error;
mod github;
mod icons;
mod layout;
mod profile;
mod render;
pub mod server;
mod totals;

pub use carousel::{render_carousel, validate_username};
pub use config::{API_BASE_URI_ENV, ServerSettings, ServiceSettings, TOKEN_ENV};
pub use error::{Error, io_error, output_io_error};
pub use github::GitHubClient;
pub use icons::{IconRegistry, load_icon_registry};
pub use layout::{CanvasMetrics, CarouselLayout, ItemKind, LayoutItem, compute_layout};
pub use profile::{MIN_BYTES, OutputWrapper, PALETTE, Profile, ProfileSpec};
pub use render::{RenderedCarousel, render_layout};
pub use totals::{LanguageBreakdown, LanguageTotals};

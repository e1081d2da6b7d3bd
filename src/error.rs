#![allow(non_shorthand_field_patterns, unused_variables)]
#![doc = "Error handling primitives shared across the carousel crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` and `unused_variables` lints
//! for fields not named in a display message. Both lints are disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Only three variants ever reach an HTTP caller as a rendering outcome:
//! [`Error::UpstreamListing`], [`Error::InvalidUsername`] and
//! [`Error::EmptyResult`]. Each is answered with a plain-text body; there is
//! no structured error payload.

use std::path::{Path, PathBuf};

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response}
};

/// Unified error type returned by the aggregator, renderer, and server.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading the icon registry.
    #[error("failed to read icon registry from {path:?}: {source}")]
    Io {
        /// Location of the registry document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse icon registry: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// The repository listing call answered with a non-success status.
    #[error("GitHub API Error / Invalid Username / Rate Limit.")]
    UpstreamListing {
        /// Status code reported by the upstream API.
        status: u16
    },
    /// The listing response was not a list of repositories, or the name
    /// cannot be a GitHub login.
    #[error("Invalid GitHub Username")]
    InvalidUsername {
        /// Username supplied by the caller.
        username: String
    },
    /// No language met the byte threshold.
    #[error("No languages above threshold.")]
    EmptyResult,
    /// The listing call never produced a response.
    #[error("GitHub API unreachable: {message}")]
    Transport {
        /// Human readable description of the transport failure.
        message: String
    },
    /// The GitHub client could not be constructed.
    #[error("failed to initialize GitHub client: {message}")]
    Client {
        /// Human readable description of the builder failure.
        message: String
    },
    /// The HTTP listener failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// Underlying I/O error reported by the listener.
        source: std::io::Error
    },
    /// Wraps I/O errors that occur while writing a rendered carousel.
    #[error("failed to write carousel to {path:?}: {source}")]
    OutputIo {
        /// Destination of the rendered document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs an invalid-username error for `username`.
    pub fn invalid_username<U>(username: U) -> Self
    where
        U: Into<String>
    {
        Self::InvalidUsername {
            username: username.into()
        }
    }

    /// HTTP status used when the error is answered to an inbound caller.
    ///
    /// Upstream listing failures propagate the upstream status verbatim;
    /// statuses the `http` crate rejects degrade to `502 Bad Gateway`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamListing {
                status
            } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Self::InvalidUsername {
                ..
            }
            | Self::EmptyResult => StatusCode::NOT_FOUND,
            Self::Transport {
                ..
            } => StatusCode::BAD_GATEWAY,
            Self::Io {
                ..
            }
            | Self::Parse {
                ..
            }
            | Self::Validation {
                ..
            }
            | Self::Client {
                ..
            }
            | Self::Server {
                ..
            }
            | Self::OutputIo {
                ..
            } => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_display_string()
        )
            .into_response()
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the registry document that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::OutputIo`] variant capturing the failing path and
/// source.
pub fn output_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::OutputIo {
        path: path.to_path_buf(),
        source
    }
}

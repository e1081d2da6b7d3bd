//! Runtime settings shared by the server and the offline renderer.
//!
//! Only the GitHub credential, the API root, and the icon registry location
//! are configurable. Visual constants live in [`crate::profile`] and are
//! compiled in.

use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    path::PathBuf
};

use crate::{
    error::Error,
    github::GitHubClient,
    icons::{IconRegistry, load_icon_registry}
};

/// Environment variable holding the optional GitHub credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the GitHub API root.
pub const API_BASE_URI_ENV: &str = "GITHUB_API_URL";

/// Settings required to aggregate and render carousels.
#[derive(Clone, Default)]
pub struct ServiceSettings {
    /// Credential attached to every outbound call, if any.
    pub github_token: Option<String>,
    /// Alternative GitHub API root. `None` targets `api.github.com`.
    pub api_base_uri: Option<String>,
    /// Replacement icon registry document. `None` uses the built-in one.
    pub icons_path:   Option<PathBuf>
}

impl fmt::Debug for ServiceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceSettings")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("api_base_uri", &self.api_base_uri)
            .field("icons_path", &self.icons_path)
            .finish()
    }
}

impl ServiceSettings {
    /// Builds the GitHub client described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the client cannot be constructed.
    pub fn github_client(&self) -> Result<GitHubClient, Error> {
        let token = self.github_token.as_deref();
        match self.api_base_uri.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => GitHubClient::with_base_uri(uri, token),
            _ => GitHubClient::new(token)
        }
    }

    /// Loads the icon registry described by these settings.
    ///
    /// # Errors
    ///
    /// Propagates registry loading errors.
    pub fn icon_registry(&self) -> Result<IconRegistry, Error> {
        match self.icons_path.as_deref() {
            Some(path) => load_icon_registry(path),
            None => IconRegistry::builtin()
        }
    }

    /// Returns `true` when outbound calls carry a credential.
    pub fn is_authenticated(&self) -> bool {
        self.github_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Address the listener binds to.
    pub host:    IpAddr,
    /// Port the listener binds to.
    pub port:    u16,
    /// Aggregation and rendering settings.
    pub service: ServiceSettings
}

impl ServerSettings {
    /// Socket address derived from [`host`](Self::host) and
    /// [`port`](Self::port).
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Language usage aggregation over the GitHub REST API.
//!
//! Lists a user's repositories, fetches every repository's language
//! breakdown concurrently, and folds the breakdowns into
//! [`LanguageTotals`]. Per-repository failures are skipped silently.

use std::fmt;

use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    totals::{LanguageBreakdown, LanguageTotals},
};

/// Repositories requested from the listing endpoint.
const LISTING_PAGE_SIZE: u32 = 100;

/// Thin wrapper over an [`Octocrab`] client used for aggregation.
///
/// The client is cheap to clone. Octocrab's retry middleware is disabled, so
/// every outbound call is attempted exactly once.
#[derive(Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl fmt::Debug for GitHubClient
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("GitHubClient",).finish_non_exhaustive()
    }
}

/// Reason a repository's breakdown did not contribute to the totals.
#[derive(Debug,)]
enum SkippedRepository
{
    Status(u16,),
    Transport(String,),
    Malformed(String,),
}

impl fmt::Display for SkippedRepository
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            Self::Status(status,) => write!(f, "upstream answered {status}"),
            Self::Transport(message,) => write!(f, "request failed: {message}"),
            Self::Malformed(message,) => write!(f, "malformed breakdown: {message}"),
        }
    }
}

impl GitHubClient
{
    /// Creates a client for `api.github.com`.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional credential attached to every call. `None` or a
    ///   blank value issues anonymous requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the underlying client cannot be built.
    pub fn new(token: Option<&str,>,) -> Result<Self, Error,>
    {
        Self::build(None, token,)
    }

    /// Creates a client for an alternative API root, such as a GitHub
    /// Enterprise instance or a local mock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when `base_uri` is not a valid URI or the
    /// client cannot be built.
    pub fn with_base_uri(base_uri: &str, token: Option<&str,>,) -> Result<Self, Error,>
    {
        Self::build(Some(base_uri,), token,)
    }

    fn build(base_uri: Option<&str,>, token: Option<&str,>,) -> Result<Self, Error,>
    {
        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None,);

        if let Some(uri,) = base_uri {
            builder = builder.base_uri(uri,).map_err(|e| Error::Client {
                message: format!("invalid API base URI '{uri}': {e}"),
            },)?;
        }

        if let Some(token,) = token.map(str::trim,).filter(|value| !value.is_empty(),) {
            builder = builder.personal_token(token.to_owned(),);
        }

        let octocrab = builder.build().map_err(|e| Error::Client {
            message: e.to_string(),
        },)?;

        Ok(Self {
            octocrab,
        },)
    }

    /// Aggregates language byte counts across all repositories of
    /// `username`.
    ///
    /// One breakdown request is spawned per repository exposing a
    /// `languages_url`; all of them run concurrently without a cap. Results
    /// are merged in listing order once every task has settled, so the order
    /// in which requests complete never changes the totals.
    ///
    /// # Errors
    ///
    /// * [`Error::UpstreamListing`] when the listing call returns a
    ///   non-success status.
    /// * [`Error::InvalidUsername`] when the listing body is not a JSON array.
    /// * [`Error::Transport`] when the listing call produces no response.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lang_carousel::GitHubClient;
    ///
    /// # async fn example() -> Result<(), lang_carousel::Error> {
    /// let client = GitHubClient::new(std::env::var("GITHUB_TOKEN").ok().as_deref())?;
    /// let totals = client.language_totals("octocat").await?;
    /// for (language, bytes) in totals.iter() {
    ///     println!("{language}: {bytes}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn language_totals(&self, username: &str,) -> Result<LanguageTotals, Error,>
    {
        let urls = self.list_language_urls(username,).await?;
        debug!(username, repositories = urls.len(), "fetching language breakdowns");

        let handles: Vec<_,> = urls
            .into_iter()
            .map(|url| {
                let octocrab = self.octocrab.clone();
                tokio::spawn(async move {
                    let outcome = fetch_breakdown(&octocrab, &url,).await;
                    (url, outcome,)
                },)
            },)
            .collect();

        let mut totals = LanguageTotals::new();
        let mut skipped = 0usize;

        for handle in handles {
            match handle.await {
                Ok((_, Ok(breakdown,),),) => totals.merge(&breakdown,),
                Ok((url, Err(reason,),),) => {
                    skipped += 1;
                    debug!(%url, %reason, "skipping repository");
                }
                Err(error,) => {
                    skipped += 1;
                    debug!(%error, "language breakdown task did not complete");
                }
            }
        }

        info!(username, languages = totals.len(), skipped, "aggregated language usage");

        Ok(totals,)
    }

    async fn list_language_urls(&self, username: &str,) -> Result<Vec<String,>, Error,>
    {
        let route = format!("/users/{username}/repos?per_page={LISTING_PAGE_SIZE}");
        let response = self.octocrab._get(route,).await.map_err(|e| Error::Transport {
            message: e.to_string(),
        },)?;

        let status = response.status();
        if !status.is_success() {
            warn!(username, status = status.as_u16(), "repository listing failed");
            return Err(Error::UpstreamListing {
                status: status.as_u16(),
            },);
        }

        let body = self.octocrab.body_to_string(response,).await.map_err(|e| Error::Transport {
            message: e.to_string(),
        },)?;

        parse_listing(username, &body,)
    }
}

/// Extracts the `languages_url` of every repository record.
///
/// Records without a string `languages_url` are ignored.
fn parse_listing(username: &str, body: &str,) -> Result<Vec<String,>, Error,>
{
    let Ok(Value::Array(records,),) = serde_json::from_str::<Value,>(body,) else {
        return Err(Error::invalid_username(username,),);
    };

    Ok(records
        .iter()
        .filter_map(|record| record.get("languages_url",).and_then(Value::as_str,),)
        .filter(|url| !url.is_empty(),)
        .map(str::to_owned,)
        .collect(),)
}

async fn fetch_breakdown(
    octocrab: &Octocrab,
    url: &str,
) -> Result<LanguageBreakdown, SkippedRepository,>
{
    let response = octocrab
        ._get(url,)
        .await
        .map_err(|e| SkippedRepository::Transport(e.to_string(),),)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SkippedRepository::Status(status.as_u16(),),);
    }

    let body = octocrab
        .body_to_string(response,)
        .await
        .map_err(|e| SkippedRepository::Transport(e.to_string(),),)?;

    serde_json::from_str(&body,).map_err(|e| SkippedRepository::Malformed(e.to_string(),),)
}

#[cfg(test)]
mod tests
{
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, header_exists, method, path},
    };

    use super::*;

    fn client_for(server: &MockServer,) -> GitHubClient
    {
        GitHubClient::with_base_uri(&server.uri(), None,).expect("failed to build client",)
    }

    async fn mount_listing(server: &MockServer, user: &str, repositories: &[&str],)
    {
        let records: Vec<Value,> = repositories
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "languages_url": format!("{}/repos/{user}/{name}/languages", server.uri()),
                })
            },)
            .collect();

        Mock::given(method("GET",),)
            .and(path(format!("/users/{user}/repos"),),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(records,),)
            .mount(server,)
            .await;
    }

    async fn mount_languages(server: &MockServer, user: &str, repository: &str, body: Value,)
    {
        Mock::given(method("GET",),)
            .and(path(format!("/repos/{user}/{repository}/languages"),),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(body,),)
            .mount(server,)
            .await;
    }

    #[tokio::test]
    async fn sums_bytes_across_repositories()
    {
        let server = MockServer::start().await;
        mount_listing(&server, "octocat", &["alpha", "beta",],).await;
        mount_languages(&server, "octocat", "alpha", json!({ "Go": 10000 }),).await;
        mount_languages(&server, "octocat", "beta", json!({ "Go": 2000, "Rust": 6000 }),).await;

        let totals = client_for(&server,).language_totals("octocat",).await.expect("aggregation",);

        assert_eq!(totals.get("Go"), Some(12000));
        assert_eq!(totals.get("Rust"), Some(6000));
        assert_eq!(totals.len(), 2);
    }

    #[tokio::test]
    async fn failed_breakdown_is_skipped()
    {
        let server = MockServer::start().await;
        mount_listing(&server, "octocat", &["alpha", "broken",],).await;
        mount_languages(&server, "octocat", "alpha", json!({ "Rust": 7000 }),).await;
        Mock::given(method("GET",),)
            .and(path("/repos/octocat/broken/languages",),)
            .respond_with(ResponseTemplate::new(500,),)
            .mount(&server,)
            .await;

        let totals = client_for(&server,).language_totals("octocat",).await.expect("aggregation",);

        assert_eq!(totals.get("Rust"), Some(7000));
        assert_eq!(totals.len(), 1);
    }

    #[tokio::test]
    async fn malformed_breakdown_is_skipped()
    {
        let server = MockServer::start().await;
        mount_listing(&server, "octocat", &["alpha", "odd",],).await;
        mount_languages(&server, "octocat", "alpha", json!({ "Go": 9000 }),).await;
        mount_languages(&server, "octocat", "odd", json!({ "Go": "lots" }),).await;

        let totals = client_for(&server,).language_totals("octocat",).await.expect("aggregation",);

        assert_eq!(totals.get("Go"), Some(9000));
    }

    #[tokio::test]
    async fn listing_failure_propagates_status()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/ghost/repos",),)
            .respond_with(ResponseTemplate::new(404,).set_body_json(json!({ "message": "Not Found" }),),)
            .mount(&server,)
            .await;

        let error = client_for(&server,)
            .language_totals("ghost",)
            .await
            .expect_err("listing should fail",);

        match error {
            Error::UpstreamListing {
                status,
            } => assert_eq!(status, 404),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_list_listing_is_invalid_username()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/odd/repos",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({ "message": "?" }),),)
            .mount(&server,)
            .await;

        let error = client_for(&server,)
            .language_totals("odd",)
            .await
            .expect_err("listing should be rejected",);

        assert!(matches!(error, Error::InvalidUsername { .. }));
    }

    #[tokio::test]
    async fn token_is_attached_to_outbound_calls()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat/repos",),)
            .and(header_exists("authorization",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([
                { "name": "alpha", "languages_url": format!("{}/repos/octocat/alpha/languages", server.uri()) }
            ]),),)
            .mount(&server,)
            .await;
        Mock::given(method("GET",),)
            .and(path("/repos/octocat/alpha/languages",),)
            .and(header("authorization", "Bearer secret",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({ "Rust": 7000 }),),)
            .expect(1,)
            .mount(&server,)
            .await;

        let client = GitHubClient::with_base_uri(&server.uri(), Some("secret",),)
            .expect("failed to build client",);
        let totals = client.language_totals("octocat",).await.expect("aggregation",);

        assert_eq!(totals.get("Rust"), Some(7000));
    }

    #[test]
    fn listing_parser_ignores_records_without_languages_url()
    {
        let body = r#"[{"name":"a","languages_url":"https://api.test/a"},{"name":"b"},{"languages_url":null}]"#;
        let urls = parse_listing("octocat", body,).expect("valid listing",);
        assert_eq!(urls, vec!["https://api.test/a".to_owned()]);
    }

    #[test]
    fn listing_parser_rejects_non_json()
    {
        let error = parse_listing("octocat", "<html>",).expect_err("expected rejection",);
        assert!(matches!(error, Error::InvalidUsername { .. }));
    }

    #[test]
    fn skipped_repository_reasons_are_readable()
    {
        assert_eq!(SkippedRepository::Status(500,).to_string(), "upstream answered 500");
        assert!(SkippedRepository::Malformed("bad".to_owned(),).to_string().contains("bad"));
    }

    #[test]
    fn invalid_base_uri_is_reported()
    {
        let error = GitHubClient::with_base_uri("not a uri", None,).expect_err("invalid uri",);
        assert!(matches!(error, Error::Client { .. }));
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end rendering pipeline: aggregate, filter, lay out, render.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::{
    error::Error,
    github::GitHubClient,
    icons::IconRegistry,
    layout::compute_layout,
    profile::Profile,
    render::{RenderedCarousel, render_layout},
};

/// Characters allowed in a single URI path segment without escaping.
static PATH_SEGMENT: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._~!$&'()*+,;=:@-]+$",).expect("path segment pattern must compile",)
},);

/// Rejects names that cannot be placed verbatim in the listing path.
///
/// Anything else, including enterprise-managed logins such as
/// `mona_acme`, is left for the upstream API to accept or refuse.
///
/// # Errors
///
/// Returns [`Error::InvalidUsername`] for empty names, names containing
/// `..`, and names with characters outside a URI path segment.
pub fn validate_username(username: &str,) -> Result<&str, Error,>
{
    if username.contains("..",) || !PATH_SEGMENT.is_match(username,) {
        return Err(Error::invalid_username(username,),);
    }

    Ok(username,)
}

/// Renders the language carousel of `username` with `profile`.
///
/// The empty-result check happens before any layout work, so a user with no
/// significant language never reaches the renderer.
///
/// # Errors
///
/// Propagates [`Error::InvalidUsername`], [`Error::UpstreamListing`], and
/// [`Error::Transport`] from validation and aggregation, and returns
/// [`Error::EmptyResult`] when no language reaches the profile threshold.
///
/// # Example
///
/// ```no_run
/// use lang_carousel::{GitHubClient, IconRegistry, Profile, render_carousel};
///
/// # async fn example() -> Result<(), lang_carousel::Error> {
/// let client = GitHubClient::new(None)?;
/// let registry = IconRegistry::builtin()?;
/// let carousel = render_carousel(&client, &registry, "octocat", Profile::Large).await?;
/// println!("{}", carousel.body);
/// # Ok(())
/// # }
/// ```
pub async fn render_carousel(
    client: &GitHubClient,
    registry: &IconRegistry,
    username: &str,
    profile: Profile,
) -> Result<RenderedCarousel, Error,>
{
    let username = validate_username(username,)?;
    let spec = profile.spec();

    let totals = client.language_totals(username,).await?;
    let languages = totals.significant_languages(spec.min_bytes,);
    if languages.is_empty() {
        info!(username, %profile, "no language above threshold");
        return Err(Error::EmptyResult,);
    }

    let layout = compute_layout(&languages, registry, spec, &mut rand::rng(),);
    let rendered = render_layout(&layout, spec,);

    info!(
        username,
        %profile,
        items = layout.items.len(),
        width = layout.metrics.total_width,
        "rendered language carousel"
    );

    Ok(rendered,)
}

#[cfg(test)]
mod tests
{
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    #[test]
    fn accepts_github_and_enterprise_logins()
    {
        for name in ["octocat", "a", "RAprogramm", "some-user-42", "octocat_acme", "mona-lisa_octo",] {
            assert_eq!(validate_username(name,).expect("login should be accepted",), name);
        }
    }

    #[test]
    fn leaves_unusual_but_path_safe_names_to_upstream()
    {
        let long = "a".repeat(40,);
        for name in ["-leading", "dot.name", long.as_str(),] {
            assert!(validate_username(name,).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_names_unsafe_in_a_path()
    {
        for name in ["", "with space", "../etc", "..", "a/b", "x?y", "x#y", "50%", "tab\tname", "caf\u{e9}",] {
            let error = validate_username(name,).expect_err("expected rejection",);
            assert!(matches!(error, Error::InvalidUsername { .. }), "{name}");
        }
    }

    #[tokio::test]
    async fn underscore_login_reaches_upstream()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat_acme/repos",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([]),),)
            .expect(1,)
            .mount(&server,)
            .await;

        let client = GitHubClient::with_base_uri(&server.uri(), None,).expect("client",);
        let registry = IconRegistry::default();

        let error = render_carousel(&client, &registry, "octocat_acme", Profile::Compact,)
            .await
            .expect_err("no repositories",);
        assert!(matches!(error, Error::EmptyResult));
    }

    #[tokio::test]
    async fn below_threshold_languages_yield_empty_result()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/tiny/repos",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([
                { "name": "a", "languages_url": format!("{}/repos/tiny/a/languages", server.uri()) }
            ]),),)
            .mount(&server,)
            .await;
        Mock::given(method("GET",),)
            .and(path("/repos/tiny/a/languages",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({ "Go": 4999, "Rust": 10 }),),)
            .mount(&server,)
            .await;

        let client = GitHubClient::with_base_uri(&server.uri(), None,).expect("client",);
        let registry = IconRegistry::builtin().expect("registry",);

        let error = render_carousel(&client, &registry, "tiny", Profile::Compact,)
            .await
            .expect_err("nothing to render",);
        assert!(matches!(error, Error::EmptyResult));
    }

    #[tokio::test]
    async fn invalid_names_never_reach_upstream()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([]),),)
            .expect(0,)
            .mount(&server,)
            .await;

        let client = GitHubClient::with_base_uri(&server.uri(), None,).expect("client",);
        let registry = IconRegistry::default();

        let error = render_carousel(&client, &registry, "bad name", Profile::Large,)
            .await
            .expect_err("invalid name",);
        assert!(matches!(error, Error::InvalidUsername { .. }));
    }

    #[tokio::test]
    async fn renders_known_and_unknown_languages()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/users/octocat/repos",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([
                { "name": "a", "languages_url": format!("{}/repos/octocat/a/languages", server.uri()) }
            ]),),)
            .mount(&server,)
            .await;
        Mock::given(method("GET",),)
            .and(path("/repos/octocat/a/languages",),)
            .respond_with(
                ResponseTemplate::new(200,).set_body_json(json!({ "Brainfuck": 8000, "Rust": 9000 }),),
            )
            .mount(&server,)
            .await;

        let client = GitHubClient::with_base_uri(&server.uri(), None,).expect("client",);
        let registry: IconRegistry =
            [("Rust", "https://icons.test/rust.svg",)].into_iter().collect();

        let rendered = render_carousel(&client, &registry, "octocat", Profile::Large,)
            .await
            .expect("render",);

        assert_eq!(rendered.content_type, "image/svg+xml");
        assert_eq!(rendered.body.matches("https://icons.test/rust.svg").count(), 2);
        assert_eq!(rendered.body.matches(">Brainfuck</text>").count(), 2);
    }
}

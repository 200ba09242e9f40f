//! HTTP fetching and the redirect sentinel
//!
//! The catalog site answers requests for missing book IDs and missing text
//! bodies with a redirect to a generic page instead of a 404. The client is
//! therefore built with redirects disabled, so a redirect response stays
//! observable and can be treated as the site's missing-resource signal.

use reqwest::{redirect::Policy, Client, Response};
use url::Url;

use crate::{HarvestError, Result};

/// Builds the HTTP client used for the whole run.
///
/// Redirects are handled manually (see [`check_for_redirect`]); timeouts are
/// left at transport defaults.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Redirect sentinel: a redirect response means the resource does not exist.
///
/// Runs after the status check and before any body is read; a redirected
/// body must never be parsed or saved as real content.
pub fn check_for_redirect(response: &Response) -> Result<()> {
    if response.status().is_redirection() {
        return Err(HarvestError::RedirectedAway {
            url: response.url().to_string(),
        });
    }
    Ok(())
}

fn check_status(response: &Response) -> Result<()> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(HarvestError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(())
}

async fn get(client: &Client, url: &Url) -> Result<Response> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    check_status(&response)?;
    check_for_redirect(&response)?;
    Ok(response)
}

/// Fetches a text resource, failing on non-2xx status or a redirect
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String> {
    let response = get(client, url).await?;
    response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a binary resource, failing on non-2xx status or a redirect
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>> {
    let response = get(client, url).await?;
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
}

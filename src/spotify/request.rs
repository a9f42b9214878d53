use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::sleep;

use crate::{management::TokenManager, types::Paging, warning};

pub const MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_AFTER: u64 = 5;
pub const BAD_GATEWAY_DELAY: u64 = 10;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed. Please run playsort auth")]
    Unauthorized,

    #[error("Rate limit exceeded maximum retries, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Spotify answered 502 Bad Gateway {attempts} times in a row")]
    BadGateway { attempts: u32 },

    #[error("Spotify API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Parses a `Retry-After` header value in seconds, falling back to the default.
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

/// What [`send`] does with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Hand the response to the caller.
    Done,
    /// Sleep `wait` seconds, then send again if attempts are left.
    Retry { wait: u64 },
    /// Token rejected; retrying will not help.
    Unauthorized,
    /// Any other error status, reported as [`SpotifyError::Api`].
    Fail,
}

/// Maps a response status and its `Retry-After` header to the next step.
///
/// HTTP 429 waits `Retry-After` plus one second, 502 waits
/// [`BAD_GATEWAY_DELAY`]. 401 and every other error status stop at once.
pub fn next_step(status: StatusCode, retry_after: Option<&str>) -> Step {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Step::Retry {
            wait: parse_retry_after(retry_after) + 1,
        },
        StatusCode::BAD_GATEWAY => Step::Retry {
            wait: BAD_GATEWAY_DELAY,
        },
        StatusCode::UNAUTHORIZED => Step::Unauthorized,
        status if !status.is_success() => Step::Fail,
        _ => Step::Done,
    }
}

/// Error returned once [`MAX_ATTEMPTS`] retries ran out, based on the last status seen.
pub fn exhausted(status: StatusCode, retry_after: Option<&str>) -> SpotifyError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        SpotifyError::RateLimited {
            retry_after: parse_retry_after(retry_after),
        }
    } else {
        SpotifyError::BadGateway {
            attempts: MAX_ATTEMPTS,
        }
    }
}

/// Message for [`SpotifyError::Api`]: the response body, or the status reason
/// when the body is empty or could not be read.
pub fn api_message(status: StatusCode, body: Option<String>) -> String {
    match body {
        Some(body) if !body.trim().is_empty() => body,
        _ => status.canonical_reason().unwrap_or("no response body").to_string(),
    }
}

/// Sends a request built by `build`, retrying on rate limits and bad gateways.
///
/// The builder is called once per attempt with a fresh access token, so
/// long-running loops survive token expiry. Retries follow [`next_step`]
/// and share the [`MAX_ATTEMPTS`] budget.
pub async fn send<F>(token_mgr: &mut TokenManager, build: F) -> Result<Response, SpotifyError>
where
    F: Fn(&Client, &str) -> RequestBuilder,
{
    let client = Client::new();
    let mut attempt = 0;
    let mut gave_up = SpotifyError::BadGateway { attempts: 0 };

    while attempt < MAX_ATTEMPTS {
        attempt += 1;
        let token = token_mgr.get_valid_token().await;
        let response = build(&client, token.as_str()).send().await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match next_step(status, retry_after.as_deref()) {
            Step::Done => return Ok(response),
            Step::Retry { wait } => {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    warning!(
                        "Rate limit hit. Waiting for {} seconds... (Attempt {}/{})",
                        wait,
                        attempt,
                        MAX_ATTEMPTS
                    );
                } else {
                    warning!(
                        "Bad gateway. Waiting for {} seconds... (Attempt {}/{})",
                        wait,
                        attempt,
                        MAX_ATTEMPTS
                    );
                }
                gave_up = exhausted(status, retry_after.as_deref());
                sleep(Duration::from_secs(wait)).await;
            }
            Step::Unauthorized => return Err(SpotifyError::Unauthorized),
            Step::Fail => {
                let body = response.text().await.ok();
                return Err(SpotifyError::Api {
                    status,
                    message: api_message(status, body),
                });
            }
        }
    }

    Err(gave_up)
}

/// [`send`] followed by JSON decoding of the body.
pub async fn send_json<T, F>(token_mgr: &mut TokenManager, build: F) -> Result<T, SpotifyError>
where
    T: DeserializeOwned,
    F: Fn(&Client, &str) -> RequestBuilder,
{
    let response = send(token_mgr, build).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| SpotifyError::Decode(e.to_string()))
}

/// Follows `next` links of a paging object until exhausted.
pub async fn collect_pages<T>(
    token_mgr: &mut TokenManager,
    first_url: String,
    mut on_page: impl FnMut(usize),
) -> Result<Vec<T>, SpotifyError>
where
    T: DeserializeOwned,
{
    let mut items: Vec<T> = Vec::new();
    let mut next = Some(first_url);

    while let Some(url) = next {
        let page: Paging<T> =
            send_json(token_mgr, |client, token| client.get(&url).bearer_auth(token)).await?;
        items.extend(page.items);
        next = page.next;
        on_page(items.len());
    }

    Ok(items)
}

use playsort::spotify::SpotifyError;
use playsort::spotify::request::{
    BAD_GATEWAY_DELAY, DEFAULT_RETRY_AFTER, MAX_ATTEMPTS, Step, api_message, exhausted,
    next_step, parse_retry_after,
};
use reqwest::StatusCode;

#[test]
fn test_parse_retry_after() {
    assert_eq!(parse_retry_after(Some("12")), 12);
    assert_eq!(parse_retry_after(Some(" 3 ")), 3);
    assert_eq!(parse_retry_after(Some("0")), 0);
}

#[test]
fn test_parse_retry_after_falls_back_to_default() {
    assert_eq!(parse_retry_after(None), DEFAULT_RETRY_AFTER);
    assert_eq!(parse_retry_after(Some("")), DEFAULT_RETRY_AFTER);
    // HTTP-date values are not supported
    assert_eq!(
        parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")),
        DEFAULT_RETRY_AFTER
    );
    assert_eq!(parse_retry_after(Some("-1")), DEFAULT_RETRY_AFTER);
}

#[test]
fn test_retry_budget() {
    assert_eq!(MAX_ATTEMPTS, 5);
    assert_eq!(DEFAULT_RETRY_AFTER, 5);
    assert_eq!(BAD_GATEWAY_DELAY, 10);
}

#[test]
fn test_rate_limit_waits_retry_after_plus_one() {
    assert_eq!(
        next_step(StatusCode::TOO_MANY_REQUESTS, Some("7")),
        Step::Retry { wait: 8 }
    );
    assert_eq!(
        next_step(StatusCode::TOO_MANY_REQUESTS, None),
        Step::Retry { wait: 6 }
    );
}

#[test]
fn test_bad_gateway_waits_fixed_delay() {
    assert_eq!(
        next_step(StatusCode::BAD_GATEWAY, None),
        Step::Retry { wait: 10 }
    );
    // Retry-After only applies to rate limits
    assert_eq!(
        next_step(StatusCode::BAD_GATEWAY, Some("60")),
        Step::Retry { wait: 10 }
    );
}

#[test]
fn test_unauthorized_and_other_errors_stop() {
    assert_eq!(next_step(StatusCode::UNAUTHORIZED, None), Step::Unauthorized);
    assert_eq!(next_step(StatusCode::NOT_FOUND, None), Step::Fail);
    assert_eq!(next_step(StatusCode::FORBIDDEN, None), Step::Fail);
    assert_eq!(next_step(StatusCode::SERVICE_UNAVAILABLE, None), Step::Fail);
}

#[test]
fn test_success_is_done() {
    assert_eq!(next_step(StatusCode::OK, None), Step::Done);
    assert_eq!(next_step(StatusCode::CREATED, None), Step::Done);
}

#[test]
fn test_exhausted_error_follows_last_status() {
    let err = exhausted(StatusCode::TOO_MANY_REQUESTS, Some("30"));
    assert!(matches!(err, SpotifyError::RateLimited { retry_after: 30 }));

    let err = exhausted(StatusCode::BAD_GATEWAY, None);
    assert!(matches!(err, SpotifyError::BadGateway { attempts: 5 }));
    assert_eq!(
        err.to_string(),
        "Spotify answered 502 Bad Gateway 5 times in a row"
    );
}

#[test]
fn test_api_message_falls_back_to_reason() {
    assert_eq!(api_message(StatusCode::NOT_FOUND, None), "Not Found");
    assert_eq!(
        api_message(StatusCode::NOT_FOUND, Some(String::new())),
        "Not Found"
    );
    assert_eq!(
        api_message(StatusCode::BAD_REQUEST, Some("Invalid track uri".to_string())),
        "Invalid track uri"
    );
}

#[test]
fn test_error_messages() {
    let err = SpotifyError::RateLimited { retry_after: 30 };
    assert_eq!(
        err.to_string(),
        "Rate limit exceeded maximum retries, retry after 30 seconds"
    );

    let err = SpotifyError::Api {
        status: StatusCode::NOT_FOUND,
        message: "Not found".to_string(),
    };
    assert_eq!(err.to_string(), "Spotify API error 404 Not Found: Not found");
}

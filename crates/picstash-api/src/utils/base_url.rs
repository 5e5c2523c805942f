//! Public URL construction for uploaded files

use axum::http::{header, HeaderMap};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use picstash_core::Config;

/// Characters escaped in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Base URL files are served from, without a trailing slash.
///
/// Uses the configured public base URL when set. Otherwise the scheme comes
/// from `X-Forwarded-Proto` (only `http`/`https`, default `http`) and the host
/// from the `Host` header, falling back to `localhost:<port>`.
pub fn base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(url) = config.public_base_url() {
        return url.to_string();
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("localhost:{}", config.port));

    format!("{}://{}", scheme, host)
}

/// Public URL of a stored file
pub fn file_url(config: &Config, headers: &HeaderMap, storage_key: &str) -> String {
    format!(
        "{}/{}",
        base_url(config, headers),
        utf8_percent_encode(storage_key, PATH_SEGMENT)
    )
}

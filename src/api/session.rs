// =============================================================================
// Session Identity — `session_id` cookie
// =============================================================================
//
// Watchlists are stored per client session. The session is identified by an
// opaque id carried in the `session_id` cookie. Ids are minted by the
// watchlist store; this module only reads and writes the cookie.
// =============================================================================

use axum::http::{header, HeaderMap};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Extract the session id from the request's `Cookie` header(s), if any.
pub fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value establishing `session_id`.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

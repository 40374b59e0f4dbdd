use axum::http::request::Parts;
use axum::http::header;

/// Cookie that carries the backend bearer token.
pub const TOKEN_COOKIE: &str = "earthlens_token";

pub fn token_cookie(token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        TOKEN_COOKIE, token, max_age_secs
    )
}

pub fn clear_token_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", TOKEN_COOKIE)
}

pub fn get_cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name && !val.is_empty() {
                Some(val)
            } else {
                None
            }
        })
}

/// The stored bearer token, if the browser sent one.
pub fn extract_token(parts: &Parts) -> Option<&str> {
    get_cookie_value(parts, TOKEN_COOKIE)
}

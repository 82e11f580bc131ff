//! Client-asserted request metadata
//!
//! The web client identifies itself through plain request headers. Nothing
//! here is authenticated: these helpers only read what the caller claims.

use http::HeaderMap;

/// Role claim header (`admin` or anything else)
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Acting member id header
pub const USER_ID_HEADER: &str = "x-user-id";

/// Bearer token header issued at login
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Read a header as UTF-8 text.
///
/// `HeaderMap` lookups are case-insensitive, so `X-User-Role` and
/// `x-user-role` resolve to the same entry.
pub fn extract_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

/// Asserted role, empty when the header is missing or not valid text
pub fn extract_asserted_role(headers: &HeaderMap) -> String {
    extract_header(headers, USER_ROLE_HEADER)
        .unwrap_or_default()
        .to_string()
}

/// Asserted member id; anything that is not an integer counts as absent
pub fn extract_asserted_user_id(headers: &HeaderMap) -> Option<i32> {
    extract_header(headers, USER_ID_HEADER)?.trim().parse().ok()
}

/// Bearer token, if present and non-empty
pub fn extract_auth_token(headers: &HeaderMap) -> Option<String> {
    extract_header(headers, AUTH_TOKEN_HEADER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_role_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-User-Role", HeaderValue::from_static("admin"));
        assert_eq!(extract_asserted_role(&headers), "admin");
    }

    #[test]
    fn test_missing_role_is_empty() {
        let headers = HeaderMap::new();
        assert_eq!(extract_asserted_role(&headers), "");
    }

    #[test]
    fn test_role_is_not_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("admin "));
        assert_eq!(extract_asserted_role(&headers), "admin ");
    }

    #[test]
    fn test_user_id_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("17"));
        assert_eq!(extract_asserted_user_id(&headers), Some(17));

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(extract_asserted_user_id(&headers), None);

        assert_eq!(extract_asserted_user_id(&HeaderMap::new()), None);
    }

    #[test]
    fn test_auth_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_auth_token(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_auth_token(&headers), None);

        headers.insert(AUTH_TOKEN_HEADER, HeaderValue::from_static("tok_123"));
        assert_eq!(extract_auth_token(&headers), Some("tok_123".to_string()));
    }
}

//! Request metadata extraction for access logging.

use axum::http::HeaderMap;

/// Client-side metadata captured into access log entries.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub client_ip: Option<String>,
    pub user_agent: String,
}

impl RequestMeta {
    /// Extracts client IP and user agent from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            client_ip: extract_ip_address(headers),
            user_agent: extract_user_agent(headers).unwrap_or_default(),
        }
    }
}

/// Extract User-Agent header value from HTTP headers
#[must_use]
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// Extract client IP address from HTTP headers
#[must_use]
pub fn extract_ip_address(headers: &HeaderMap) -> Option<String> {
    // Try X-Forwarded-For first (if behind proxy/load balancer).
    // It can contain multiple IPs: "client, proxy1, proxy2" - take the first.
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(client_ip) = value.split(',').next()
    {
        return Some(client_ip.trim().to_string());
    }

    // Try X-Real-IP (common with nginx)
    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
    {
        return Some(value.to_string());
    }

    None
}

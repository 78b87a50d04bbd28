//! Server-rendered HTML for the authorization interstitial.

/// Escapes a string for use inside an HTML attribute or script string.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders the interstitial page that finishes the code delivery.
///
/// The hidden iframe fetches the client's redirect URI so the platform
/// backend receives the authorization code, while the visible window
/// navigates to the tenant landing page the user actually asked for.
pub fn render_interstitial(frame_url: &str, destination_url: &str) -> String {
    let frame = escape_attr(frame_url);
    let destination = escape_attr(destination_url);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Signing you in…</title>
    <style>
        body {{ font-family: system-ui, sans-serif; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0; color: #444; }}
        iframe {{ display: none; width: 0; height: 0; border: 0; }}
    </style>
</head>
<body>
    <p>Signing you in, one moment&hellip;</p>
    <iframe src="{frame}" title="sign-in"></iframe>
    <script>
        setTimeout(function () {{
            window.location.replace("{destination}");
        }}, 1500);
    </script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interstitial_contains_both_urls() {
        let html = render_interstitial(
            "https://acme.bridgeapp.com/oauth2/redirect?code=c&state=s",
            "https://acme-safetynow.bridgeapp.com/learner/courses",
        );
        assert!(html.contains(r#"src="https://acme.bridgeapp.com/oauth2/redirect?code=c&amp;state=s""#));
        assert!(html.contains("https://acme-safetynow.bridgeapp.com/learner/courses"));
    }

    #[test]
    fn test_escaping_breaks_injection() {
        let html = render_interstitial("https://x/\"><script>alert(1)</script>", "https://y/");
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}

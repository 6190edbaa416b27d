//! Media URL safety gate. Decides whether a raw media URL may be embedded.
//!
//! Recognized YouTube URLs are rewritten into the canonical embed form;
//! other absolute URLs must match the hosting allow-list. The gate is total:
//! every input resolves to a displayable string, failures degrade to an
//! inert placeholder and a warning log. Nothing here does I/O.

use crate::domain::MediaKind;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::{ParseError, Url};

/// Hosting domains permitted for embedding. Match is exact or dotted-suffix.
const ALLOWED_DOMAINS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "youtu.be",
    "www.youtu.be",
    "player.vimeo.com",
    "vimeo.com",
];

/// Hosts that route a URL through the YouTube rewrite branch.
/// Checked directly (exact or subdomain), independent of [`ALLOWED_DOMAINS`].
const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "youtu.be"];

/// YouTube video ids are exactly this long.
const YOUTUBE_ID_LEN: usize = 11;

fn youtube_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // Known YouTube URL shapes: youtu.be/<id>, /v/<id>, /u/<letter>/<id>,
    // /embed/<id>, watch?v=<id>, &v=<id>. The id runs until #, & or ?.
    REGEX.get_or_init(|| {
        Regex::new(r"(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
            .expect("youtube id regex")
    })
}

fn absolute_url_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^https?://").expect("absolute url regex"))
}

/// Outcome of gating a media URL. Always resolves to a displayable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedDecision {
    /// Safe to embed at this address (possibly rewritten).
    Allowed(String),
    /// Unsafe or unparseable; displays as the inert placeholder.
    Blocked,
}

impl EmbedDecision {
    /// Neutral value shown in place of a blocked URL.
    pub const PLACEHOLDER: &'static str = "about:blank";

    pub fn display_url(&self) -> &str {
        match self {
            EmbedDecision::Allowed(url) => url,
            EmbedDecision::Blocked => Self::PLACEHOLDER,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            EmbedDecision::Allowed(url) => url,
            EmbedDecision::Blocked => Self::PLACEHOLDER.to_string(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, EmbedDecision::Blocked)
    }
}

/// Gate a media URL. Total: never panics, never returns an error.
///
/// YouTube references (declared or detected by host) are rewritten into the
/// canonical `youtube.com/embed` form. Relative URLs are trusted local
/// assets. Everything else must parse and match the allow-list.
pub fn decide(url: &str, declared: MediaKind) -> EmbedDecision {
    if declared == MediaKind::Youtube || is_youtube_url(url) {
        let id = extract_youtube_id(url).unwrap_or_else(|| {
            // Known degenerate case: the empty id stays in the template.
            warn!(url, "no {}-char video id found in youtube url", YOUTUBE_ID_LEN);
            String::new()
        });
        return EmbedDecision::Allowed(format!(
            "https://www.youtube.com/embed/{id}?autoplay=1&rel=0"
        ));
    }
    if is_url_safe(url) {
        EmbedDecision::Allowed(url.to_string())
    } else {
        EmbedDecision::Blocked
    }
}

fn is_url_safe(url: &str) -> bool {
    if !absolute_url_regex().is_match(url) {
        // Relative/local asset paths are trusted by construction. Anything
        // with whitespace or an explicit non-http scheme is not a local path.
        if url.contains(char::is_whitespace) {
            warn!(url, "malformed url");
            return false;
        }
        return match Url::parse(url) {
            Err(ParseError::RelativeUrlWithoutBase) => true,
            Ok(_) => {
                warn!(url, "non-http scheme is not embeddable");
                false
            }
            Err(e) => {
                warn!(url, error = %e, "malformed url");
                false
            }
        };
    }
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|host| host_allowed(host, ALLOWED_DOMAINS)),
        Err(e) => {
            warn!(url, error = %e, "malformed url");
            false
        }
    }
}

/// Exact match or dotted-suffix match (`sub.vimeo.com` passes for `vimeo.com`,
/// `vimeo.com.evil.example` does not).
fn host_allowed(host: &str, allowed: &[&str]) -> bool {
    allowed
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

fn is_youtube_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|host| host_allowed(host, YOUTUBE_HOSTS)),
        Err(e) => {
            debug!(url, error = %e, "not an absolute url, skipping youtube check");
            false
        }
    }
}

fn extract_youtube_id(url: &str) -> Option<String> {
    let captures = youtube_id_regex().captures(url)?;
    let id = captures.get(2)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn embed_url(id: &str) -> String {
        format!("https://www.youtube.com/embed/{id}?autoplay=1&rel=0")
    }

    fn decide_plain(url: &str) -> EmbedDecision {
        decide(url, MediaKind::Unspecified)
    }

    #[test]
    fn rewrites_short_youtube_links() {
        let got = decide_plain(&format!("https://youtu.be/{ID}"));
        assert_eq!(got, EmbedDecision::Allowed(embed_url(ID)));
    }

    #[test]
    fn rewrites_watch_links() {
        let got = decide_plain(&format!("https://www.youtube.com/watch?v={ID}"));
        assert_eq!(got, EmbedDecision::Allowed(embed_url(ID)));
    }

    #[test]
    fn rewrites_watch_links_with_extra_params() {
        let got = decide_plain(&format!("https://www.youtube.com/watch?list=abc&v={ID}#t=10"));
        assert_eq!(got, EmbedDecision::Allowed(embed_url(ID)));
    }

    #[test]
    fn rewrites_embed_links_on_subdomains() {
        let got = decide_plain(&format!("https://m.youtube.com/embed/{ID}"));
        assert_eq!(got, EmbedDecision::Allowed(embed_url(ID)));
    }

    #[test]
    fn declared_youtube_forces_rewrite() {
        let got = decide(&format!("https://example.com/watch?v={ID}"), MediaKind::Youtube);
        assert_eq!(got, EmbedDecision::Allowed(embed_url(ID)));
    }

    #[test]
    fn failed_extraction_keeps_empty_id_in_template() {
        // Degenerate case retained: id shorter than 11 chars embeds as empty.
        let got = decide("https://youtu.be/short", MediaKind::Unspecified);
        assert_eq!(got, EmbedDecision::Allowed(embed_url("")));
    }

    #[test]
    fn allow_listed_hosts_pass_unchanged() {
        for url in [
            "https://vimeo.com/12345",
            "https://player.vimeo.com/video/12345",
            "http://sub.vimeo.com/12345",
        ] {
            assert_eq!(decide_plain(url), EmbedDecision::Allowed(url.to_string()));
        }
    }

    #[test]
    fn unlisted_hosts_are_blocked() {
        assert!(decide_plain("https://evil.example.com/video.mp4").is_blocked());
        assert!(decide_plain("https://notvimeo.com/1").is_blocked());
        // Suffix check must not fall for embedded allow-listed names.
        assert!(decide_plain("https://vimeo.com.evil.example/1").is_blocked());
    }

    #[test]
    fn relative_urls_pass_unchanged() {
        for url in ["assets/calm.mp3", "/media/session1.mp4", "intro.webm"] {
            assert_eq!(decide_plain(url), EmbedDecision::Allowed(url.to_string()));
        }
    }

    #[test]
    fn unparseable_input_is_blocked_not_panicking() {
        assert_eq!(decide_plain("not a url"), EmbedDecision::Blocked);
        assert_eq!(decide_plain("not a url").display_url(), "about:blank");
    }

    #[test]
    fn non_http_schemes_are_blocked() {
        assert!(decide_plain("javascript:alert(1)").is_blocked());
        assert!(decide_plain("data:text/html,hi").is_blocked());
    }

    #[test]
    fn blocked_never_echoes_the_original() {
        let got = decide_plain("https://evil.example.com/x");
        assert_eq!(got.into_url(), "about:blank");
    }
}

//! Video page URL canonicalization.

use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Canonical watch URL for a video link.
///
/// Short links (`youtu.be/<id>`) and watch links carrying playlist or
/// timestamp parameters both become `https://www.youtube.com/watch?v=<id>`.
/// Anything else, including text that does not parse as a URL, is returned
/// trimmed but otherwise unchanged.
pub fn normalize_youtube_url(raw: &str) -> String {
    let raw = raw.trim();
    match video_id(raw) {
        Some(id) => format!("{WATCH_URL}{id}"),
        None => raw.to_string(),
    }
}

fn video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    let short_id = if host.contains("youtu.be") {
        Some(url.path().trim_matches('/').to_string()).filter(|id| !id.is_empty())
    } else {
        None
    };

    let id = short_id.or_else(|| {
        if !host.contains("youtube.com") {
            return None;
        }
        url.query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })?;

    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_drops_playlist_params() {
        let url = "https://www.youtube.com/watch?v=hcu8qlRRVPE&list=RDhcu8qlRRVPE&start_radio=1";
        assert_eq!(normalize_youtube_url(url), "https://www.youtube.com/watch?v=hcu8qlRRVPE");
    }

    #[test]
    fn short_link_drops_timestamp() {
        let url = "https://youtu.be/hcu8qlRRVPE?t=10";
        assert_eq!(normalize_youtube_url(url), "https://www.youtube.com/watch?v=hcu8qlRRVPE");
    }

    #[test]
    fn mobile_host_and_parameter_order() {
        let url = "  https://m.youtube.com/watch?feature=share&v=abc123  ";
        assert_eq!(normalize_youtube_url(url), "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn unrecognized_input_is_trimmed_only() {
        assert_eq!(normalize_youtube_url("  not a url "), "not a url");
        assert_eq!(normalize_youtube_url("youtu.be/abc"), "youtu.be/abc");
        let foreign = "https://example.com/watch?v=abc";
        assert_eq!(normalize_youtube_url(foreign), foreign);
        assert_eq!(normalize_youtube_url(""), "");
    }

    #[test]
    fn missing_id_is_unchanged() {
        assert_eq!(normalize_youtube_url("https://youtu.be/"), "https://youtu.be/");
        assert_eq!(
            normalize_youtube_url("https://www.youtube.com/watch?v=&list=x"),
            "https://www.youtube.com/watch?v=&list=x"
        );
    }
}

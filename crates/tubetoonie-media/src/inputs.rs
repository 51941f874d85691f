//! URL list input.

use std::{fs, io, path::Path};

/// One URL per non-blank line, trimmed.
pub fn parse_urls_from_text(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}

/// Read a UTF-8 text file holding one URL per line.
pub fn load_urls_from_file(path: &Path) -> io::Result<Vec<String>> {
    Ok(parse_urls_from_text(&fs::read_to_string(path)?))
}

/// URLs from pasted text when there is any, else the single URL field.
pub fn resolve_urls(single_url: &str, pasted: Option<&str>) -> Vec<String> {
    if let Some(text) = pasted.filter(|text| !text.is_empty()) {
        return parse_urls_from_text(text);
    }
    let single = single_url.trim();
    if single.is_empty() { Vec::new() } else { vec![single.to_string()] }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn blank_lines_and_padding_are_dropped() {
        let text = "  https://a \n\n\t\nhttps://b\r\n";
        assert_eq!(parse_urls_from_text(text), vec!["https://a", "https://b"]);
    }

    #[test]
    fn pasted_text_wins_over_single_field() {
        assert_eq!(resolve_urls("https://single", Some("https://x\nhttps://y")), vec![
            "https://x",
            "https://y"
        ]);
        assert_eq!(resolve_urls("  https://single ", None), vec!["https://single"]);
        assert_eq!(resolve_urls("https://single", Some("")), vec!["https://single"]);
        assert!(resolve_urls("   ", None).is_empty());
    }

    #[test]
    fn file_is_read_line_by_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "https://one").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  https://two  ").unwrap();

        assert_eq!(load_urls_from_file(file.path()).unwrap(), vec!["https://one", "https://two"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_urls_from_file(&dir.path().join("absent.txt")).is_err());
    }
}

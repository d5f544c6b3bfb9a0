//! Helpers for summarising HTTP response bodies in error messages.

/// Collapse whitespace and truncate `body` for inclusion in an error message.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_whitespace() {
        assert_eq!(body_preview(b"  bad\n\tgateway  "), "bad gateway");
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(200);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), 163);
        assert!(preview.ends_with("..."));
    }
}

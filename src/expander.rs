use std::borrow::Cow;

/// Marker replaced by the interpreter's own pid.
pub const PID_MARKER: &str = "$$";

/// Replaces every `$$` in `line` with the current process id.
pub fn expand(line: &str) -> Cow<'_, str> {
    expand_marker(line, PID_MARKER, &std::process::id().to_string())
}

/// Left-to-right, non-overlapping replacement of `marker` by `value`.
/// Replacement text is never re-scanned.
pub fn expand_marker<'a>(line: &'a str, marker: &str, value: &str) -> Cow<'a, str> {
    if marker.is_empty() || !line.contains(marker) {
        return Cow::Borrowed(line);
    }
    Cow::Owned(line.replace(marker, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_is_borrowed() {
        let out = expand("ls -la\n");
        assert!(matches!(out, Cow::Borrowed("ls -la\n")));
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let pid = std::process::id().to_string();
        let out = expand("echo $$ and $$\n");
        assert_eq!(out, format!("echo {pid} and {pid}\n"));
    }

    #[test]
    fn test_odd_run_is_non_overlapping() {
        assert_eq!(expand_marker("$$$", "$$", "42"), "42$");
        assert_eq!(expand_marker("$$$$", "$$", "42"), "4242");
    }

    #[test]
    fn test_replacement_not_rescanned() {
        assert_eq!(expand_marker("a$$b", "$$", "$$"), "a$$b");
        assert_eq!(expand_marker("$$", "$$", "$"), "$");
    }

    #[test]
    fn test_marker_inside_word() {
        assert_eq!(expand_marker("file.$$.tmp", "$$", "7"), "file.7.tmp");
    }
}

//! Capture line splitting.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line break regex"));
static LEADING_BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•]\s+").expect("valid bullet regex"));

/// Splits brain-dump input into capture lines.
///
/// Each line is trimmed, loses one leading `-`, `*` or `•` bullet followed by
/// whitespace, and is dropped when nothing remains. Order is preserved.
pub fn split_capture(input: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(input)
        .map(str::trim)
        .map(|line| LEADING_BULLET_RE.replace(line, "").into_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits input into trimmed non-empty lines without touching bullets.
///
/// Used by the remote brain-dump path, which stores lines verbatim.
pub fn split_lines(input: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(input.trim())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_capture, split_lines};
    use proptest::prelude::*;

    #[test]
    fn strips_bullets_and_blank_lines() {
        assert_eq!(
            split_capture("- buy milk\n\n*  call mom\n  "),
            vec!["buy milk", "call mom"]
        );
    }

    #[test]
    fn handles_crlf_and_unicode_bullets() {
        assert_eq!(
            split_capture("• water plants\r\n  - stretch  \r\rjournal"),
            vec!["water plants", "stretch", "journal"]
        );
    }

    #[test]
    fn bullet_without_space_is_kept() {
        assert_eq!(split_capture("-\n-5 dollars"), vec!["-", "-5 dollars"]);
    }

    #[test]
    fn only_one_bullet_is_stripped() {
        assert_eq!(split_capture("- - nested"), vec!["- nested"]);
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        assert!(split_capture("").is_empty());
        assert!(split_capture(" \n\t\r\n ").is_empty());
    }

    #[test]
    fn split_lines_keeps_bullets() {
        assert_eq!(
            split_lines("  - buy milk\n\n call mom "),
            vec!["- buy milk", "call mom"]
        );
    }

    proptest! {
        #[test]
        fn output_lines_are_trimmed_single_line_substrings(input in any::<String>()) {
            for line in split_capture(&input) {
                prop_assert!(!line.is_empty());
                prop_assert!(!line.contains('\n') && !line.contains('\r'));
                prop_assert_eq!(line.trim(), line.as_str());
                prop_assert!(input.contains(line.as_str()));
            }
        }

        #[test]
        fn one_output_per_non_blank_unbulleted_line(
            lines in prop::collection::vec("[a-z][a-z ]{0,12}", 0..8),
            separator in prop::sample::select(vec!["\n", "\r\n", "\n\n  \n"]),
        ) {
            let input = lines.join(separator);
            let expected: Vec<String> = lines.iter().map(|line| line.trim().to_string()).collect();
            prop_assert_eq!(split_capture(&input), expected);
        }
    }
}

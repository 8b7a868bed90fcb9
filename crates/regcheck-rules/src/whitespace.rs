//! # Whitespace
//!
//! The registry is indented with spaces and carries no trailing whitespace.
//! Line endings are read as text: `"\r\n"` and a lone `'\r'` both end a line,
//! so CRLF files are judged on their content only.

use regcheck_core::{Violation, WhitespaceIssue};

/// Report every line holding a tab, and every line with trailing whitespace.
///
/// A line with both problems yields two violations, tab first.
pub fn check(raw: &str) -> Vec<Violation> {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut violations = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if line.contains('\t') {
            violations.push(violation(i + 1, line, WhitespaceIssue::Tab));
        }
        if line.trim_end() != line {
            violations.push(violation(i + 1, line, WhitespaceIssue::TrailingSpaces));
        }
    }
    violations
}

fn violation(line: usize, content: &str, issue: WhitespaceIssue) -> Violation {
    Violation::Whitespace {
        line,
        content: content.to_string(),
        issue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clean_text_passes() {
        assert!(check("{\n    \"users\": []\n}\n").is_empty());
    }

    #[test]
    fn trailing_spaces_reported_with_line_number() {
        let raw = "{\n  trailing space here   \n}";
        let violations = check(raw);
        assert_eq!(
            violations,
            [Violation::Whitespace {
                line: 2,
                content: "  trailing space here   ".into(),
                issue: WhitespaceIssue::TrailingSpaces,
            }]
        );
        assert!(violations[0]
            .to_string()
            .starts_with("Whitespace issue in \"  trailing space here   \", line 2:"));
    }

    #[test]
    fn tab_reported() {
        let violations = check("{\n\t\"users\": []\n}");
        assert!(matches!(
            violations.as_slice(),
            [Violation::Whitespace {
                line: 2,
                issue: WhitespaceIssue::Tab,
                ..
            }]
        ));
    }

    #[test]
    fn trailing_tab_reports_both_issues() {
        let violations = check("a\t");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn crlf_line_endings_pass() {
        let raw = "{\r\n    \"companies\": [],\r\n    \"users\": []\r\n}\r\n";
        assert!(check(raw).is_empty(), "{:?}", check(raw));
    }

    #[test]
    fn trailing_spaces_before_crlf_reported() {
        let violations = check("{\r\n    \"users\": []  \r\n}\r\n");
        assert!(matches!(
            violations.as_slice(),
            [Violation::Whitespace {
                line: 2,
                issue: WhitespaceIssue::TrailingSpaces,
                ..
            }]
        ));
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let violations = check("a\rb \rc");
        assert!(matches!(
            violations.as_slice(),
            [Violation::Whitespace { line: 2, .. }]
        ));
    }

    #[test]
    fn every_offending_line_reported() {
        assert_eq!(check("a \nb\nc \n d").len(), 2);
    }

    proptest! {
        /// Text built from lines without tabs or trailing spaces always passes.
        #[test]
        fn clean_lines_pass(lines in prop::collection::vec("[a-z{}\\[\\]\":,]( *[a-z{}\":,])*|", 0..30)) {
            let raw = lines.join("\n");
            prop_assert!(check(&raw).is_empty());
        }

        /// Line numbers are 1-based and in range.
        #[test]
        fn line_numbers_in_range(raw in "[a \t\n]{0,80}") {
            let count = raw.split('\n').count();
            for v in check(&raw) {
                let Violation::Whitespace { line, .. } = v else {
                    panic!("unexpected violation kind");
                };
                prop_assert!(line >= 1 && line <= count);
            }
        }
    }
}

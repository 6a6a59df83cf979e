//! Free-text cleanup for advisory fields.
//!
//! The upstream exporter line-wraps long advisory text containing URLs,
//! leaving a stray quote and control characters in front of `, http`.
//! Control characters also break the tab-delimited output, so they are
//! flattened to spaces before the delimiter repair.

/// Normalize control characters and repair broken URL delimiters.
///
/// Idempotent: applying it twice yields the same result as applying it
/// once. The repair runs to a fixpoint because collapsing one quote can
/// expose another stacked behind it.
pub fn sanitize_text(value: &str) -> String {
    let mut text: String = value
        .chars()
        .map(|c| match c {
            '\r' | '\n' | '\t' => ' ',
            other => other,
        })
        .collect();
    text = text.trim().to_string();

    loop {
        let collapsed = collapse_quote_artifacts(&text);
        if collapsed == text {
            return collapsed;
        }
        text = collapsed;
    }
}

/// Collapse every `"`, followed by any run of spaces, followed by the
/// literal `, http`, into `, http`.
fn collapse_quote_artifacts(text: &str) -> String {
    const MARKER: &str = ", http";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('"') {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);

        let after_quote = &tail[1..];
        let trimmed = after_quote.trim_start_matches(' ');
        if trimmed.starts_with(MARKER) {
            // Drop the quote and the space run; the marker itself is kept.
            rest = trimmed;
        } else {
            out.push('"');
            rest = after_quote;
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn control_characters_become_spaces() {
        assert_eq!(sanitize_text("a\rb\nc\td"), "a b c d");
    }

    #[test]
    fn leading_and_trailing_whitespace_is_trimmed() {
        assert_eq!(sanitize_text("  patch now  "), "patch now");
    }

    #[test]
    fn known_delimiter_artifacts_collapse() {
        // The five literal variants the exporter is known to produce.
        for input in [
            "see \"\r, https://vendor.example/adv",
            "see \"\n, https://vendor.example/adv",
            "see \"\r\n, https://vendor.example/adv",
            "see \" , https://vendor.example/adv",
            "see \", https://vendor.example/adv",
        ] {
            assert_eq!(sanitize_text(input), "see , https://vendor.example/adv");
        }
    }

    #[test]
    fn stacked_quotes_still_collapse_fully() {
        let input = "ref \"\"\r, https://a.example";
        let once = sanitize_text(input);
        assert_eq!(once, "ref , https://a.example");
        assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn ordinary_quotes_are_preserved() {
        assert_eq!(
            sanitize_text("install \"Patch A\" first"),
            "install \"Patch A\" first"
        );
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(input in "[ -~\\r\\n\\t\"]{0,120}") {
            let once = sanitize_text(&input);
            let twice = sanitize_text(&once);
            prop_assert_eq!(once, twice);
        }
    }
}

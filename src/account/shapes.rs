//! Ordered matchers for the accepted `user@host` shapes.
//!
//! Each matcher either splits the raw identifier into its user and host parts
//! or declines. The table order is significant: the bare alphanumeric shape
//! must be tried before the bare symbolic one.

use std::sync::LazyLock;

use regex::Regex;

use super::QuoteStyle;

#[expect(
    clippy::expect_used,
    reason = "the host pattern is a compile-time constant"
)]
static RESTRICTED_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9A-Za-z_%.:/-]+\z").expect("restricted host pattern"));

#[expect(
    clippy::expect_used,
    reason = "the bare account pattern is a compile-time constant"
)]
static BARE_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([0-9A-Za-z$_]*)@([0-9A-Za-z_%.:/-]+)\z").expect("bare alphanumeric pattern")
});

/// User and host parts of an identifier, borrowed from the raw input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Split<'a> {
    pub(super) user: &'a str,
    pub(super) host: &'a str,
    pub(super) quote: Option<QuoteStyle>,
}

/// A named matcher for one accepted identifier shape.
pub(super) struct Shape {
    pub(super) name: &'static str,
    pub(super) matcher: fn(&str) -> Option<Split<'_>>,
}

/// Accepted shapes in evaluation order; the first match wins.
pub(super) const SHAPES: [Shape; 3] = [
    Shape {
        name: "quoted",
        matcher: match_quoted,
    },
    Shape {
        name: "bare alphanumeric",
        matcher: match_bare_alphanumeric,
    },
    Shape {
        name: "bare symbolic",
        matcher: match_bare_symbolic,
    },
];

/// Returns `true` for characters allowed in an unquoted identifier.
pub(super) const fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '$' | '_')
}

fn match_quoted(raw: &str) -> Option<Split<'_>> {
    let mut chars = raw.chars();
    let quote = chars.next().and_then(QuoteStyle::from_char)?;
    let (user, after_quote) = chars.as_str().split_once(quote.as_char())?;
    let host = after_quote.strip_prefix('@')?;
    if user.contains('\n') || !RESTRICTED_HOST.is_match(host) {
        return None;
    }
    Some(Split {
        user,
        host,
        quote: Some(quote),
    })
}

fn match_bare_alphanumeric(raw: &str) -> Option<Split<'_>> {
    let captures = BARE_ALPHANUMERIC.captures(raw)?;
    Some(Split {
        user: captures.get(1)?.as_str(),
        host: captures.get(2)?.as_str(),
        quote: None,
    })
}

fn match_bare_symbolic(raw: &str) -> Option<Split<'_>> {
    if raw.starts_with(|ch: char| QuoteStyle::from_char(ch).is_some()) || raw.contains('\n') {
        return None;
    }
    // Right-most `@` that still leaves a non-empty host.
    let (user, host) = raw.match_indices('@').rev().find_map(|(index, _)| {
        let host = raw.get(index + 1..)?;
        (!host.is_empty()).then_some((raw.get(..index)?, host))
    })?;
    if user.chars().all(is_identifier_char) {
        return None;
    }
    Some(Split {
        user,
        host,
        quote: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn first_match(raw: &str) -> Option<(&'static str, Split<'_>)> {
        SHAPES
            .iter()
            .find_map(|shape| (shape.matcher)(raw).map(|split| (shape.name, split)))
    }

    #[rstest]
    #[case("'a.b'@host", "quoted", "a.b", "host")]
    #[case("`back`@10.0.0.%", "quoted", "back", "10.0.0.%")]
    #[case("\"it's\"@localhost", "quoted", "it's", "localhost")]
    #[case("''@localhost", "quoted", "", "localhost")]
    #[case("bob@localhost", "bare alphanumeric", "bob", "localhost")]
    #[case("@localhost", "bare alphanumeric", "", "localhost")]
    #[case("$app_1@db.example.com", "bare alphanumeric", "$app_1", "db.example.com")]
    #[case("bob.smith@localhost", "bare symbolic", "bob.smith", "localhost")]
    #[case("a@b@c", "bare symbolic", "a@b", "c")]
    #[case("a-b@c@", "bare symbolic", "a-b", "c@")]
    #[case("bob smith@Host Name", "bare symbolic", "bob smith", "Host Name")]
    fn shapes_split_identifiers(
        #[case] raw: &str,
        #[case] shape: &str,
        #[case] user: &str,
        #[case] host: &str,
    ) {
        let (matched, split) = first_match(raw).expect("identifier should match a shape");
        assert_eq!(matched, shape, "shape for {raw}");
        assert_eq!(split.user, user, "user part for {raw}");
        assert_eq!(split.host, host, "host part for {raw}");
    }

    #[rstest]
    #[case("bob")]
    #[case("bob@")]
    #[case("'bob@localhost")]
    #[case("'bob'@local host")]
    #[case("'bob'localhost")]
    #[case("bob@local host")]
    #[case("bob\n@localhost")]
    #[case("")]
    fn shapes_reject_malformed_identifiers(#[case] raw: &str) {
        assert!(first_match(raw).is_none(), "{raw:?} should not match");
    }

    #[test]
    fn quoted_shape_records_the_delimiter() {
        let split = match_quoted("`x`@h").expect("backtick quoted identifier");
        assert_eq!(split.quote, Some(QuoteStyle::Backtick));
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

/// The canonical form every recognized variant collapses to.
pub const CANONICAL: &str = "online-privacy";

/// Key holding the tag list in front matter.
pub const TAGS_KEY: &str = "tags";

// Full-string match on the variant: "online privacy" with the separator as
// whitespace, hyphen, underscore, or omitted, any case.
static VARIANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^online[\s\-_]?privacy$").unwrap());

/// Check whether a single tag string is a recognized variant.
fn is_variant(tag: &str) -> bool {
    VARIANT_RE.is_match(tag.trim())
}

/// Rewrite variant entries to the canonical tag and deduplicate.
///
/// Non-string entries pass through verbatim and never match. Deduplication
/// keeps the first occurrence of each distinct value, preserving order.
/// Returns the new list and whether any substitution occurred; a list that
/// only loses duplicates does not count as changed.
pub fn normalize_tags(tags: &[Value]) -> (Vec<Value>, bool) {
    let mut changed = false;
    let mut substituted = Vec::with_capacity(tags.len());

    for tag in tags {
        match tag {
            Value::String(s) if is_variant(s) => {
                // The canonical form matches its own pattern; rewriting it
                // to itself is not a change, so repeated runs are no-ops.
                if s != CANONICAL {
                    changed = true;
                }
                substituted.push(Value::String(CANONICAL.to_string()));
            }
            other => substituted.push(other.clone()),
        }
    }

    let mut deduped: Vec<Value> = Vec::with_capacity(substituted.len());
    for tag in substituted {
        if !deduped.contains(&tag) {
            deduped.push(tag);
        }
    }

    (deduped, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_is_variant() {
        let cases = vec![
            ("online privacy", true),
            ("Online Privacy", true),
            ("ONLINE-PRIVACY", true),
            ("online_privacy", true),
            ("onlineprivacy", true),
            ("  online privacy  ", true), // surrounding whitespace trimmed
            ("online-privacy", true),     // canonical form is itself a variant
            ("online  privacy", false),   // at most one separator character
            ("online privacy!", false),   // full-string match only
            ("privacy", false),
            ("online", false),
            ("", false),
        ];

        for (tag, want) in cases {
            let got = is_variant(tag);
            assert_eq!(got, want, "is_variant({:?}) = {:?}, want {:?}", tag, got, want);
        }
    }

    #[test]
    fn test_substitutes_variant() {
        let (got, changed) = normalize_tags(&tags(&["Online Privacy", "security"]));
        assert_eq!(got, tags(&["online-privacy", "security"]));
        assert!(changed);
    }

    #[test]
    fn test_variant_collapses_into_existing_canonical() {
        let (got, changed) = normalize_tags(&tags(&["online_privacy", "online-privacy"]));
        assert_eq!(got, tags(&["online-privacy"]));
        assert!(changed);
    }

    #[test]
    fn test_no_variant_means_no_change() {
        let (got, changed) = normalize_tags(&tags(&["privacy", "security"]));
        assert_eq!(got, tags(&["privacy", "security"]));
        assert!(!changed);
    }

    #[test]
    fn test_already_canonical_reports_no_change() {
        let (got, changed) = normalize_tags(&tags(&["online-privacy"]));
        assert_eq!(got, tags(&["online-privacy"]));
        assert!(!changed, "canonical input must be a no-op across runs");
    }

    #[test]
    fn test_second_pass_is_fixed_point() {
        let (first, changed) = normalize_tags(&tags(&["Online Privacy", "security"]));
        assert!(changed);
        let (second, changed_again) = normalize_tags(&first);
        assert_eq!(first, second);
        assert!(!changed_again, "second pass must report no change");
    }

    #[test]
    fn test_order_of_first_appearance_preserved() {
        let (got, _) = normalize_tags(&tags(&["b", "a", "b", "c", "a"]));
        assert_eq!(got, tags(&["b", "a", "c"]));
    }

    #[test]
    fn test_non_string_entries_pass_through() {
        let input = vec![
            Value::from("Online Privacy"),
            Value::from(42),
            Value::Null,
            Value::from(42), // duplicate non-string is still deduplicated
        ];
        let (got, changed) = normalize_tags(&input);
        assert_eq!(
            got,
            vec![Value::from("online-privacy"), Value::from(42), Value::Null]
        );
        assert!(changed);
    }

    #[test]
    fn test_dedup_alone_is_not_a_change() {
        let (got, changed) = normalize_tags(&tags(&["security", "security"]));
        assert_eq!(got, tags(&["security"]));
        assert!(!changed, "dedup without substitution must not report change");
    }
}

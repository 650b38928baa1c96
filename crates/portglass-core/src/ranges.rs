// ── Port-range expression parsing ──
//
// Range expressions are comma-separated tokens, each a single integer
// or an inclusive `a-b` span. Parsing is lenient: a malformed token is
// skipped and the rest of the expression stays valid, because a user
// mid-edit should never blank the whole panel.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::model::PortSection;

/// Width of the default block a new section covers when the device's
/// detected port count is unknown.
const DEFAULT_BLOCK: u32 = 23;

/// Parse a range expression into an ascending set of port indices.
///
/// `"1-4, 7, 9-10"` → `{1, 2, 3, 4, 7, 9, 10}`. Tokens that fail to
/// parse, and spans with `a > b`, are dropped silently.
pub fn parse(expr: &str) -> BTreeSet<u32> {
    let mut ports = BTreeSet::new();
    for token in expr.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((lo, hi)) = token.split_once('-') {
            let (Ok(lo), Ok(hi)) = (lo.trim().parse::<u32>(), hi.trim().parse::<u32>()) else {
                continue;
            };
            if lo <= hi {
                ports.extend(lo..=hi);
            }
        } else if let Ok(idx) = token.parse::<u32>() {
            ports.insert(idx);
        }
    }
    ports
}

/// Parse and enforce the section invariant: at least one index, and
/// index 0 only when the device allows it.
pub fn validate(expr: &str, allow_port_zero: bool) -> Result<BTreeSet<u32>, CoreError> {
    let ports = parse(expr);
    if ports.is_empty() {
        return Err(CoreError::InvalidRange {
            expr: expr.to_owned(),
            reason: "no valid port indices".into(),
        });
    }
    if !allow_port_zero && ports.contains(&0) {
        return Err(CoreError::InvalidRange {
            expr: expr.to_owned(),
            reason: "port 0 is not allowed on this device".into(),
        });
    }
    Ok(ports)
}

/// The largest integer appearing *anywhere* in the expression, scanning
/// every token split on `,` and `-`.
///
/// This is deliberately not the maximum of the parsed set: a descending
/// span like `"40-30"` parses to nothing but still yields 40 here, and
/// a trailing-garbage token contributes its leading digits. Next-range
/// derivation depends on this exact policy.
pub fn range_max(expr: &str) -> Option<u32> {
    expr.split([',', '-'])
        .filter_map(|token| leading_int(token.trim()))
        .max()
}

/// Numeric prefix of a token, if any (`"10gbe"` → 10).
fn leading_int(token: &str) -> Option<u32> {
    let digits: &str = {
        let end = token
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(token.len(), |(i, _)| i);
        &token[..end]
    };
    digits.parse().ok()
}

/// Default range for a section appended after `sections`.
///
/// With no existing sections the block starts at 0 or 1 depending on
/// `allow_port_zero`; otherwise it starts one past the last section's
/// [`range_max`]. The block ends 24 ports later, stretched to the
/// device's detected port count when that is known and larger.
pub fn next_range(
    sections: &[PortSection],
    allow_port_zero: bool,
    detected_ports: u32,
) -> (u32, u32) {
    let mut start = u32::from(!(sections.is_empty() && allow_port_zero));
    if let Some(last) = sections.last() {
        if !last.port_ranges.is_empty() {
            start = range_max(&last.port_ranges).unwrap_or(0) + 1;
        }
    }

    let mut end = start + DEFAULT_BLOCK;
    if detected_ports > start {
        end = detected_ports;
    }
    (start, end)
}

/// Format a `(start, end)` pair the way range expressions are written.
pub fn format_range(start: u32, end: u32) -> String {
    format!("{start}-{end}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{LayoutMode, PortKind};

    fn set(indices: &[u32]) -> BTreeSet<u32> {
        indices.iter().copied().collect()
    }

    fn section_with_ranges(ranges: &str) -> PortSection {
        PortSection {
            id: "sec-1".into(),
            title: String::new(),
            kind: PortKind::Rj45,
            layout: LayoutMode::OddTop,
            rows: 2,
            port_ranges: ranges.into(),
            is_combo: false,
            ports: Vec::new(),
        }
    }

    #[test]
    fn parses_mixed_tokens() {
        assert_eq!(parse("1-4,7,9-10"), set(&[1, 2, 3, 4, 7, 9, 10]));
    }

    #[test]
    fn malformed_tokens_are_skipped_not_fatal() {
        assert_eq!(parse("abc,5"), set(&[5]));
        assert_eq!(parse("1-x,3"), set(&[3]));
        assert_eq!(parse(",,8,"), set(&[8]));
    }

    #[test]
    fn whitespace_around_tokens_is_ignored() {
        assert_eq!(parse(" 1 - 3 ,  6 "), set(&[1, 2, 3, 6]));
    }

    #[test]
    fn descending_spans_parse_to_nothing() {
        assert_eq!(parse("10-5"), set(&[]));
        assert_eq!(parse("10-5,2"), set(&[2]));
    }

    #[test]
    fn overlapping_spans_collapse_into_a_set() {
        assert_eq!(parse("1-4,3-6"), set(&[1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn zero_is_a_valid_index_for_the_parser() {
        assert_eq!(parse("0-2"), set(&[0, 1, 2]));
    }

    #[test]
    fn validate_rejects_empty_and_port_zero() {
        assert!(validate("1-4", false).is_ok());
        assert!(validate("abc", false).is_err());
        assert!(validate("0-4", false).is_err());
        assert!(validate("0-4", true).is_ok());
    }

    #[test]
    fn range_max_scans_every_token() {
        assert_eq!(range_max("1-24"), Some(24));
        assert_eq!(range_max("30-40,1-24"), Some(40));
        // Descending spans still contribute their numerals.
        assert_eq!(range_max("40-30"), Some(40));
        // Leading digits of an otherwise-bad token count.
        assert_eq!(range_max("10gbe,4"), Some(10));
        assert_eq!(range_max("abc"), None);
    }

    #[test]
    fn next_range_for_empty_sections() {
        assert_eq!(next_range(&[], false, 0), (1, 24));
        assert_eq!(next_range(&[], true, 0), (0, 23));
    }

    #[test]
    fn next_range_continues_past_the_last_section() {
        let sections = vec![section_with_ranges("1-24")];
        assert_eq!(next_range(&sections, false, 0), (25, 48));
    }

    #[test]
    fn next_range_stretches_to_detected_ports() {
        let sections = vec![section_with_ranges("1-24")];
        assert_eq!(next_range(&sections, false, 48), (25, 48));
        // Detected count at or below the start has no effect.
        assert_eq!(next_range(&sections, false, 20), (25, 48));
    }

    #[test]
    fn next_range_with_blank_last_range_falls_back_to_one() {
        let sections = vec![section_with_ranges("")];
        assert_eq!(next_range(&sections, true, 0), (1, 24));
    }

    #[test]
    fn format_range_matches_expression_syntax() {
        assert_eq!(format_range(25, 48), "25-48");
    }
}

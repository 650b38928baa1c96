// ── Section editing operations ──
//
// All operations take the current section list by reference and return
// a new list; the fetched snapshot is never mutated, so a cancelled
// edit leaves live state untouched. Unknown section ids are a silent
// no-op, matching the backing store's tolerant behavior.

use chrono::Utc;

use crate::model::{LayoutMode, PortKind, PortSection};
use crate::ranges;

/// A typed single-field edit for [`edit_section`].
#[derive(Debug, Clone)]
pub enum SectionEdit {
    Title(String),
    Kind(PortKind),
    Layout(LayoutMode),
    Rows(u32),
    PortRanges(String),
}

fn new_section_id() -> String {
    format!("sec-{}", Utc::now().timestamp_millis())
}

/// Append a fresh RJ45 section covering the next free port block.
///
/// The block starts one past the previous section's largest range token
/// (see [`ranges::next_range`] for the exact policy) and spans 24 ports,
/// stretched to `detected_ports` when that is known and larger.
pub fn add_section(
    sections: &[PortSection],
    allow_port_zero: bool,
    detected_ports: u32,
) -> Vec<PortSection> {
    let (start, end) = ranges::next_range(sections, allow_port_zero, detected_ports);

    let mut next = sections.to_vec();
    next.push(PortSection {
        id: new_section_id(),
        // Default title matches the connector type.
        title: "RJ45".into(),
        kind: PortKind::Rj45,
        layout: LayoutMode::OddTop,
        rows: 2,
        port_ranges: ranges::format_range(start, end),
        is_combo: false,
        ports: Vec::new(),
    });
    next
}

/// Append a combo companion for the last section: same range, layout,
/// and row count, with the connector family flipped (RJ45 ↔ SFP).
///
/// Disallowed on an empty list -- there is nothing to pair with -- in
/// which case the input is returned unchanged.
pub fn add_combo_section(sections: &[PortSection]) -> Vec<PortSection> {
    let Some(last) = sections.last() else {
        return sections.to_vec();
    };

    let rows = if last.rows == 0 { 2 } else { last.rows };
    let mut next = sections.to_vec();
    next.push(PortSection {
        id: new_section_id(),
        title: "Combo Section".into(),
        kind: last.kind.combo_counterpart(),
        layout: last.layout,
        rows,
        port_ranges: last.port_ranges.clone(),
        is_combo: true,
        ports: Vec::new(),
    });
    next
}

/// Remove the section with the given id.
pub fn delete_section(sections: &[PortSection], id: &str) -> Vec<PortSection> {
    sections.iter().filter(|s| s.id != id).cloned().collect()
}

/// Apply a single-field edit to the section with the given id.
pub fn edit_section(sections: &[PortSection], id: &str, edit: &SectionEdit) -> Vec<PortSection> {
    sections
        .iter()
        .map(|s| {
            if s.id != id {
                return s.clone();
            }
            let mut edited = s.clone();
            match edit {
                SectionEdit::Title(title) => edited.title = title.clone(),
                SectionEdit::Kind(kind) => edited.kind = kind.clone(),
                SectionEdit::Layout(layout) => edited.layout = *layout,
                SectionEdit::Rows(rows) => edited.rows = *rows,
                SectionEdit::PortRanges(expr) => edited.port_ranges = expr.clone(),
            }
            edited
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn section(id: &str, kind: PortKind, ranges: &str) -> PortSection {
        PortSection {
            id: id.into(),
            title: id.into(),
            kind,
            layout: LayoutMode::OddTop,
            rows: 2,
            port_ranges: ranges.into(),
            is_combo: false,
            ports: Vec::new(),
        }
    }

    #[test]
    fn add_section_on_empty_list() {
        let next = add_section(&[], false, 0);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].port_ranges, "1-24");
        assert_eq!(next[0].kind, PortKind::Rj45);
        assert_eq!(next[0].title, "RJ45");
        assert!(next[0].id.starts_with("sec-"));
        assert!(!next[0].is_combo);
    }

    #[test]
    fn add_section_continues_the_last_range() {
        let existing = vec![section("sec-1", PortKind::Rj45, "1-24")];
        let next = add_section(&existing, false, 48);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].port_ranges, "25-48");
        // Input untouched.
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn add_combo_inherits_and_flips_the_connector() {
        let existing = vec![section("sec-1", PortKind::Rj45, "21-24")];
        let next = add_combo_section(&existing);
        assert_eq!(next.len(), 2);
        let combo = &next[1];
        assert!(combo.is_combo);
        assert_eq!(combo.kind, PortKind::Sfp);
        assert_eq!(combo.port_ranges, "21-24");
        assert_eq!(combo.rows, 2);
        assert_eq!(combo.title, "Combo Section");
    }

    #[test]
    fn add_combo_flips_fiber_back_to_copper() {
        let existing = vec![section("sec-1", PortKind::Sfp28, "49-52")];
        let next = add_combo_section(&existing);
        assert_eq!(next[1].kind, PortKind::Rj45);
    }

    #[test]
    fn add_combo_is_a_no_op_on_an_empty_list() {
        let next = add_combo_section(&[]);
        assert!(next.is_empty());
    }

    #[test]
    fn delete_section_by_id() {
        let existing = vec![
            section("sec-1", PortKind::Rj45, "1-24"),
            section("sec-2", PortKind::Sfp, "25-28"),
        ];
        let next = delete_section(&existing, "sec-1");
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "sec-2");

        // Unknown id: silent no-op.
        let unchanged = delete_section(&existing, "sec-9");
        assert_eq!(unchanged, existing);
    }

    #[test]
    fn edit_section_changes_exactly_one_field() {
        let existing = vec![
            section("sec-1", PortKind::Rj45, "1-24"),
            section("sec-2", PortKind::Sfp, "25-28"),
        ];
        let next = edit_section(&existing, "sec-2", &SectionEdit::Rows(1));
        assert_eq!(next[1].rows, 1);
        assert_eq!(next[1].port_ranges, "25-28");
        assert_eq!(next[0], existing[0]);

        let next = edit_section(&next, "sec-2", &SectionEdit::PortRanges("25-32".into()));
        assert_eq!(next[1].port_ranges, "25-32");

        let next = edit_section(&next, "sec-2", &SectionEdit::Layout(LayoutMode::Sequential));
        assert_eq!(next[1].layout, LayoutMode::Sequential);
    }
}

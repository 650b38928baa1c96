// ── Front-panel layout engine ──
//
// Pure transformation from a section list (plus an optionally selected
// interface) to render-ready layout groups. No mutation of inputs, no
// hidden state: ports are re-sorted by physical index on every call, so
// structurally equal inputs always produce structurally equal outputs.

use serde::Serialize;

use crate::model::{LayoutMode, Port, PortSection};

/// Sub-interface cells drawn inside one breakout slot (2×2 grid).
pub const BREAKOUT_CELLS: usize = 4;

/// One cell of a breakout slot, bound to a sub-interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakoutCell<'a> {
    pub port: &'a Port,
    pub selected: bool,
}

/// One physical slot in a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Slot<'a> {
    Single {
        port: &'a Port,
        selected: bool,
    },
    /// A breakout slot subdivided into up to [`BREAKOUT_CELLS`] cells,
    /// in sub-port array order. Selection applies to cells only -- the
    /// parent is never selectable.
    Breakout {
        parent: &'a Port,
        cells: Vec<BreakoutCell<'a>>,
    },
}

/// A section partitioned into rows of slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionLayout<'a> {
    pub section: &'a PortSection,
    pub rows: Vec<Vec<Slot<'a>>>,
}

/// A render group: one section on its own, or a combo pair sharing a
/// frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LayoutGroup<'a> {
    Standalone(SectionLayout<'a>),
    Combo {
        left: SectionLayout<'a>,
        right: SectionLayout<'a>,
    },
}

/// Flattened port census for the usage legend. Breakout sub-ports
/// replace their parent in the counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
}

impl UsageSummary {
    /// Share of ports that are up, in percent.
    pub fn usage_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = (self.up as f64 / self.total as f64) * 100.0;
        pct
    }
}

/// Build the full front-panel arrangement.
///
/// Sections are walked in order; a section whose *successor* is flagged
/// `is_combo` forms a combo pair with it. A combo flag on the first
/// section of the list, or a second consecutive combo flag, is a
/// configuration error -- the offending section is rendered standalone
/// instead of failing the panel.
pub fn build_layout<'a>(
    sections: &'a [PortSection],
    selected: Option<&str>,
) -> Vec<LayoutGroup<'a>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < sections.len() {
        let current = &sections[i];
        match sections.get(i + 1) {
            Some(next) if next.is_combo => {
                groups.push(LayoutGroup::Combo {
                    left: section_layout(current, selected),
                    right: section_layout(next, selected),
                });
                i += 2;
            }
            _ => {
                groups.push(LayoutGroup::Standalone(section_layout(current, selected)));
                i += 1;
            }
        }
    }
    groups
}

/// Partition one section's ports into rows.
pub fn section_layout<'a>(section: &'a PortSection, selected: Option<&str>) -> SectionLayout<'a> {
    let mut sorted: Vec<&Port> = section.ports.iter().collect();
    sorted.sort_by_key(|p| p.physical_index);

    let row_count = section.effective_rows() as usize;
    let row_ports: Vec<Vec<&Port>> =
        if section.layout == LayoutMode::OddTop && row_count == 2 {
            let (odd, even): (Vec<&Port>, Vec<&Port>) =
                sorted.iter().copied().partition(|p| p.physical_index % 2 != 0);
            vec![odd, even]
        } else {
            // Contiguous chunks of ceil(count / rows); trailing rows may
            // come up short or empty.
            let per_row = sorted.len().div_ceil(row_count);
            (0..row_count)
                .map(|r| {
                    let start = (r * per_row).min(sorted.len());
                    let end = (start + per_row).min(sorted.len());
                    sorted[start..end].to_vec()
                })
                .collect()
        };

    let rows = row_ports
        .into_iter()
        .map(|row| row.into_iter().map(|p| slot(p, selected)).collect())
        .collect();

    SectionLayout { section, rows }
}

fn slot<'a>(port: &'a Port, selected: Option<&str>) -> Slot<'a> {
    if port.is_breakout {
        let cells = port
            .breakout_ports
            .iter()
            .take(BREAKOUT_CELLS)
            .map(|sub| BreakoutCell {
                port: sub,
                selected: selected == Some(sub.if_name.as_str()),
            })
            .collect();
        Slot::Breakout {
            parent: port,
            cells,
        }
    } else {
        Slot::Single {
            port,
            selected: selected == Some(port.if_name.as_str()),
        }
    }
}

/// Resolve an interface name to its live port, descending into breakout
/// sub-ports. Selection state survives snapshot replacement through
/// this lookup.
pub fn find_port<'a>(sections: &'a [PortSection], if_name: &str) -> Option<&'a Port> {
    for section in sections {
        for port in &section.ports {
            if port.if_name == if_name {
                return Some(port);
            }
            if port.is_breakout {
                if let Some(sub) = port.breakout_ports.iter().find(|sp| sp.if_name == if_name) {
                    return Some(sub);
                }
            }
        }
    }
    None
}

/// Count the flattened port census across all sections.
pub fn usage_summary(sections: &[PortSection]) -> UsageSummary {
    let mut summary = UsageSummary::default();
    let mut tally = |port: &Port| {
        summary.total += 1;
        if port.state.is_up() {
            summary.up += 1;
        } else {
            summary.down += 1;
        }
    };
    for section in sections {
        for port in &section.ports {
            if port.is_breakout {
                port.breakout_ports.iter().for_each(&mut tally);
            } else {
                tally(port);
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{LinkState, PortKind, PortMode};

    fn port(index: u32, if_name: &str) -> Port {
        Port {
            physical_index: index,
            kind: PortKind::Rj45,
            state: if index % 2 == 0 {
                LinkState::Down
            } else {
                LinkState::Up
            },
            if_name: if_name.into(),
            if_desc: String::new(),
            speed: 0,
            in_rate: 0,
            out_rate: 0,
            vlan_id: 1,
            allowed_vlans: String::new(),
            mode: PortMode::Access,
            is_breakout: false,
            breakout_ports: Vec::new(),
            dom: None,
        }
    }

    fn section(id: &str, is_combo: bool, ports: Vec<Port>) -> PortSection {
        PortSection {
            id: id.into(),
            title: id.into(),
            kind: PortKind::Rj45,
            layout: LayoutMode::OddTop,
            rows: 2,
            port_ranges: "1-6".into(),
            is_combo,
            ports,
        }
    }

    fn indices(row: &[Slot<'_>]) -> Vec<u32> {
        row.iter()
            .map(|slot| match slot {
                Slot::Single { port, .. } => port.physical_index,
                Slot::Breakout { parent, .. } => parent.physical_index,
            })
            .collect()
    }

    #[test]
    fn odd_top_two_rows_splits_by_parity() {
        let ports = (1..=6).map(|i| port(i, &format!("Gi{i}"))).collect();
        let sec = section("sec-1", false, ports);

        let layout = section_layout(&sec, None);
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(indices(&layout.rows[0]), vec![1, 3, 5]);
        assert_eq!(indices(&layout.rows[1]), vec![2, 4, 6]);
    }

    #[test]
    fn odd_top_with_other_row_counts_chunks_sequentially() {
        let ports = (1..=7).map(|i| port(i, &format!("Gi{i}"))).collect();
        let mut sec = section("sec-1", false, ports);
        sec.rows = 3;

        let layout = section_layout(&sec, None);
        // ceil(7 / 3) = 3 per row, last row short.
        assert_eq!(indices(&layout.rows[0]), vec![1, 2, 3]);
        assert_eq!(indices(&layout.rows[1]), vec![4, 5, 6]);
        assert_eq!(indices(&layout.rows[2]), vec![7]);
    }

    #[test]
    fn sequential_mode_ignores_parity() {
        let ports = (1..=4).map(|i| port(i, &format!("Gi{i}"))).collect();
        let mut sec = section("sec-1", false, ports);
        sec.layout = LayoutMode::Sequential;

        let layout = section_layout(&sec, None);
        assert_eq!(indices(&layout.rows[0]), vec![1, 2]);
        assert_eq!(indices(&layout.rows[1]), vec![3, 4]);
    }

    #[test]
    fn ports_are_resorted_regardless_of_input_order() {
        let ports = vec![port(5, "e"), port(1, "a"), port(3, "c")];
        let mut sec = section("sec-1", false, ports);
        sec.layout = LayoutMode::Sequential;
        sec.rows = 1;

        let layout = section_layout(&sec, None);
        assert_eq!(indices(&layout.rows[0]), vec![1, 3, 5]);
    }

    #[test]
    fn zero_rows_falls_back_to_two() {
        let ports = (1..=4).map(|i| port(i, &format!("Gi{i}"))).collect();
        let mut sec = section("sec-1", false, ports);
        sec.rows = 0;

        let layout = section_layout(&sec, None);
        assert_eq!(layout.rows.len(), 2);
    }

    #[test]
    fn combo_successor_merges_into_one_group() {
        let a = section("a", false, vec![port(1, "a1")]);
        let b = section("b", true, vec![port(1, "b1")]);

        let binding = [a, b];
        let groups = build_layout(&binding, None);
        assert_eq!(groups.len(), 1);
        match &groups[0] {
            LayoutGroup::Combo { left, right } => {
                assert_eq!(left.section.id, "a");
                assert_eq!(right.section.id, "b");
            }
            other => panic!("expected combo group, got: {other:?}"),
        }
    }

    #[test]
    fn leading_combo_flag_renders_standalone() {
        let a = section("a", true, vec![port(1, "a1")]);

        let binding = [a];
        let groups = build_layout(&binding, None);
        assert_eq!(groups.len(), 1);
        assert!(matches!(groups[0], LayoutGroup::Standalone(_)));
    }

    #[test]
    fn consecutive_combo_flags_degrade_gracefully() {
        let a = section("a", false, vec![]);
        let b = section("b", true, vec![]);
        let c = section("c", true, vec![]);

        let binding = [a, b, c];
        let groups = build_layout(&binding, None);
        assert_eq!(groups.len(), 2);
        assert!(matches!(groups[0], LayoutGroup::Combo { .. }));
        assert!(matches!(groups[1], LayoutGroup::Standalone(_)));
    }

    #[test]
    fn breakout_slot_selects_at_sub_port_granularity() {
        let mut parent = port(49, "Port 49 (Breakout)");
        parent.is_breakout = true;
        parent.breakout_ports = vec![
            port(49, "Eth49/1"),
            port(49, "Eth49/2"),
            port(49, "Eth49/3"),
            port(49, "Eth49/4"),
            port(49, "Eth49/5"), // excess cell, dropped from the grid
        ];
        let mut sec = section("q", false, vec![parent]);
        sec.rows = 1;
        sec.layout = LayoutMode::Sequential;

        // Selecting by the parent's name must not mark anything.
        let layout = section_layout(&sec, Some("Port 49 (Breakout)"));
        match &layout.rows[0][0] {
            Slot::Breakout { cells, .. } => {
                assert_eq!(cells.len(), BREAKOUT_CELLS);
                assert!(cells.iter().all(|c| !c.selected));
            }
            other => panic!("expected breakout slot, got: {other:?}"),
        }

        // Selecting a sub-interface marks exactly that cell.
        let layout = section_layout(&sec, Some("Eth49/2"));
        match &layout.rows[0][0] {
            Slot::Breakout { cells, .. } => {
                let selected: Vec<&str> = cells
                    .iter()
                    .filter(|c| c.selected)
                    .map(|c| c.port.if_name.as_str())
                    .collect();
                assert_eq!(selected, vec!["Eth49/2"]);
            }
            other => panic!("expected breakout slot, got: {other:?}"),
        }
    }

    #[test]
    fn layout_is_deterministic_over_structurally_equal_inputs() {
        let make = || {
            vec![
                section("a", false, (1..=6).map(|i| port(i, &format!("Gi{i}"))).collect()),
                section("b", true, vec![port(1, "Sfp1")]),
            ]
        };
        let first_input = make();
        let second_input = make();

        let first = build_layout(&first_input, Some("Gi3"));
        let second = build_layout(&second_input, Some("Gi3"));
        assert_eq!(first, second);
    }

    #[test]
    fn find_port_descends_into_breakouts() {
        let mut parent = port(49, "Port 49 (Breakout)");
        parent.is_breakout = true;
        parent.breakout_ports = vec![port(49, "Eth49/1"), port(49, "Eth49/2")];
        let sections = vec![
            section("a", false, vec![port(1, "Gi1")]),
            section("q", false, vec![parent]),
        ];

        assert_eq!(find_port(&sections, "Gi1").map(|p| p.physical_index), Some(1));
        assert_eq!(
            find_port(&sections, "Eth49/2").map(|p| p.if_name.as_str()),
            Some("Eth49/2")
        );
        assert!(find_port(&sections, "missing").is_none());
    }

    #[test]
    fn usage_summary_flattens_breakouts() {
        let mut parent = port(49, "Port 49 (Breakout)");
        parent.is_breakout = true;
        parent.breakout_ports = vec![port(1, "Eth49/1"), port(2, "Eth49/2")];
        let sections = vec![section("a", false, vec![port(1, "Gi1"), parent])];

        let summary = usage_summary(&sections);
        // Gi1 (up) + two sub-ports (one up, one down); the parent is not counted.
        assert_eq!(summary.total, 3);
        assert_eq!(summary.up, 2);
        assert_eq!(summary.down, 1);
        let pct = summary.usage_percent();
        assert!((pct - 66.666).abs() < 0.01, "got {pct}");
    }

    #[test]
    fn empty_sections_produce_empty_rows() {
        let sec = section("empty", false, vec![]);
        let layout = section_layout(&sec, None);
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.rows.iter().all(Vec::is_empty));
    }
}

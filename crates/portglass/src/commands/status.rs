//! One-shot snapshot view: system info, usage legend, text panel, and
//! optional per-port detail.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use portglass_core::{
    DeviceSnapshot, LayoutGroup, Port, SectionLayout, Slot, layout,
};

use crate::cli::{GlobalOpts, OutputFormat, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    ctx: &util::Ctx,
    args: &StatusArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snapshot = DeviceSnapshot::from(ctx.client.get_status(args.device).await?);

    if global.output == OutputFormat::Json {
        output::print_output(&output::render_json(&snapshot), global.quiet);
        return Ok(());
    }

    let color = output::should_color();
    let mut out = String::new();

    if let Some(ref system) = snapshot.system {
        let _ = writeln!(out, "{}", system.name);
        let _ = writeln!(out, "  uptime:   {}", system.uptime);
        if !system.descr.is_empty() {
            let _ = writeln!(out, "  descr:    {}", system.descr);
        }
        if !system.location.is_empty() {
            let _ = writeln!(out, "  location: {}", system.location);
        }
    }

    let summary = layout::usage_summary(&snapshot.sections);
    let _ = writeln!(
        out,
        "{} total / {} up / {} down / {:.1}% usage",
        summary.total,
        summary.up,
        summary.down,
        summary.usage_percent()
    );
    let _ = writeln!(out);

    let groups = layout::build_layout(&snapshot.sections, args.port.as_deref());
    for group in &groups {
        match group {
            LayoutGroup::Standalone(section) => render_section(&mut out, section, color),
            LayoutGroup::Combo { left, right } => {
                let _ = writeln!(out, "── combo group ──");
                render_section(&mut out, left, color);
                render_section(&mut out, right, color);
            }
        }
    }

    if let Some(ref if_name) = args.port {
        let port = layout::find_port(&snapshot.sections, if_name).ok_or_else(|| {
            CliError::PortNotFound {
                if_name: if_name.clone(),
            }
        })?;
        render_port_detail(&mut out, port, color);
    }

    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}

/// One section as rows of slot cells. A breakout slot shows its cell
/// states inline, e.g. `49[ud--]`.
fn render_section(out: &mut String, section: &SectionLayout<'_>, color: bool) {
    let _ = writeln!(
        out,
        "{} ({}, {})",
        section.section.title,
        section.section.kind,
        section.section.layout
    );
    for row in &section.rows {
        let mut line = String::from("  ");
        for slot in row {
            match slot {
                Slot::Single { port, selected } => {
                    let cell = format!("{:>3}", port.physical_index);
                    let cell = if *selected {
                        format!("[{}]", cell.trim())
                    } else {
                        cell
                    };
                    if color && port.state.is_up() {
                        let _ = write!(line, " {}", cell.green());
                    } else {
                        let _ = write!(line, " {cell}");
                    }
                }
                Slot::Breakout { parent, cells } => {
                    let mut marks = String::new();
                    for cell in cells {
                        marks.push(if cell.port.state.is_up() { 'u' } else { 'd' });
                    }
                    while marks.len() < layout::BREAKOUT_CELLS {
                        marks.push('-');
                    }
                    let _ = write!(line, " {:>3}[{marks}]", parent.physical_index);
                }
            }
        }
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);
}

fn render_port_detail(out: &mut String, port: &Port, color: bool) {
    let _ = writeln!(
        out,
        "{}  {}",
        port.if_name,
        output::state_label(port.state, color)
    );
    if !port.if_desc.is_empty() {
        let _ = writeln!(out, "  descr:    {}", port.if_desc);
    }
    let _ = writeln!(out, "  type:     {}", port.kind);
    let _ = writeln!(out, "  speed:    {}", output::format_speed(port.speed));
    let _ = writeln!(out, "  in rate:  {}", output::format_rate(port.in_rate));
    let _ = writeln!(out, "  out rate: {}", output::format_rate(port.out_rate));
    if port.is_trunk() {
        let _ = writeln!(out, "  native vlan:   {}", port.vlan_id);
        let allowed = if port.allowed_vlans.is_empty() {
            "none"
        } else {
            &port.allowed_vlans
        };
        let _ = writeln!(out, "  allowed vlans: {allowed}");
    } else {
        let _ = writeln!(out, "  access vlan: {}", port.vlan_id);
    }

    if let Some(ref dom) = port.dom {
        let _ = writeln!(out, "  transceiver:");
        if let Some(v) = dom.temperature {
            let _ = writeln!(out, "    temp: {v:.1} °C");
        }
        if let Some(v) = dom.voltage {
            let _ = writeln!(out, "    vcc:  {v:.2} V");
        }
        if let Some(v) = dom.tx_power {
            let _ = writeln!(out, "    tx:   {v:.2} dBm");
        }
        if let Some(v) = dom.rx_power {
            let _ = writeln!(out, "    rx:   {v:.2} dBm");
        }
        if let Some(v) = dom.bias_current {
            let _ = writeln!(out, "    bias: {v:.2} mA");
        }
    }
}

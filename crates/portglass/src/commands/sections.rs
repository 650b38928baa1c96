//! Section editing handlers.
//!
//! Every mutation re-fetches the device, applies the edit to an owned
//! copy through `portglass_core::editor`, and persists the whole record
//! with the update endpoint -- the live snapshot is never mutated.

use tabled::Tabled;

use portglass_core::{Device, PortSection, SectionEdit, convert, editor, ranges};

use crate::cli::{GlobalOpts, SectionsArgs, SectionsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Layout")]
    layout: String,
    #[tabled(rename = "Rows")]
    rows: u32,
    #[tabled(rename = "Ranges")]
    ranges: String,
    #[tabled(rename = "Combo")]
    combo: &'static str,
}

impl From<&PortSection> for SectionRow {
    fn from(s: &PortSection) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            kind: s.kind.to_string(),
            layout: s.layout.to_string(),
            rows: s.rows,
            ranges: s.port_ranges.clone(),
            combo: if s.is_combo { "yes" } else { "" },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &util::Ctx,
    args: SectionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let device = fetch_device(ctx, args.device).await?;

    match args.command {
        SectionsCommand::List => {
            let out = output::render_list(
                global.output,
                &device.sections,
                |s| SectionRow::from(s),
                |s| s.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SectionsCommand::Add => {
            let sections =
                editor::add_section(&device.sections, device.allow_port_zero, device.detected_ports);
            let added = sections.last().map(|s| s.port_ranges.clone()).unwrap_or_default();
            persist(ctx, &device, sections).await?;
            if !global.quiet {
                eprintln!("Section added covering ports {added}");
            }
            Ok(())
        }

        SectionsCommand::AddCombo => {
            if device.sections.is_empty() {
                return Err(CliError::Validation {
                    message: "a combo section needs a preceding section to pair with".into(),
                });
            }
            let sections = editor::add_combo_section(&device.sections);
            persist(ctx, &device, sections).await?;
            if !global.quiet {
                eprintln!("Combo section added");
            }
            Ok(())
        }

        SectionsCommand::Rm { id } => {
            require_section(&device, &id)?;
            if !util::confirm(&format!("Delete section '{id}'?"), global.yes)? {
                return Ok(());
            }
            let sections = editor::delete_section(&device.sections, &id);
            persist(ctx, &device, sections).await?;
            if !global.quiet {
                eprintln!("Section deleted");
            }
            Ok(())
        }

        SectionsCommand::Set {
            id,
            title,
            port_type,
            layout,
            rows,
            ranges: range_expr,
        } => {
            require_section(&device, &id)?;

            let mut edits: Vec<SectionEdit> = Vec::new();
            if let Some(title) = title {
                edits.push(SectionEdit::Title(title));
            }
            if let Some(raw) = port_type {
                edits.push(SectionEdit::Kind(convert::parse_port_kind(&raw)));
            }
            if let Some(layout) = layout {
                edits.push(SectionEdit::Layout(layout.into()));
            }
            if let Some(rows) = rows {
                edits.push(SectionEdit::Rows(rows));
            }
            if let Some(expr) = range_expr {
                ranges::validate(&expr, device.allow_port_zero)?;
                edits.push(SectionEdit::PortRanges(expr));
            }
            if edits.is_empty() {
                return Err(CliError::Validation {
                    message: "nothing to change: pass at least one field flag".into(),
                });
            }

            let mut sections = device.sections.clone();
            for edit in &edits {
                sections = editor::edit_section(&sections, &id, edit);
            }
            persist(ctx, &device, sections).await?;
            if !global.quiet {
                eprintln!("Section updated");
            }
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

async fn fetch_device(ctx: &util::Ctx, id: i64) -> Result<Device, CliError> {
    ctx.client
        .list_switches()
        .await?
        .into_iter()
        .find(|d| d.id == id)
        .map(Device::from)
        .ok_or(CliError::DeviceNotFound { id })
}

fn require_section(device: &Device, id: &str) -> Result<(), CliError> {
    if device.sections.iter().any(|s| s.id == id) {
        Ok(())
    } else {
        Err(CliError::SectionNotFound { id: id.to_owned() })
    }
}

async fn persist(
    ctx: &util::Ctx,
    device: &Device,
    sections: Vec<portglass_core::PortSection>,
) -> Result<(), CliError> {
    let updated = Device {
        sections,
        ..device.clone()
    };
    ctx.client
        .update_switch(&convert::update_request(&updated))
        .await?;
    Ok(())
}

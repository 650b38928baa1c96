//! Device command handlers.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use portglass_api::CreateDeviceRequest;
use portglass_core::{CoreError, Device};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Ports")]
    ports: String,
    #[tabled(rename = "Sections")]
    sections: usize,
    #[tabled(rename = "Enabled")]
    enabled: &'static str,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            address: d.ip_address.clone(),
            ports: if d.detected_ports == 0 {
                "?".into()
            } else {
                d.detected_ports.to_string()
            },
            sections: d.sections.len(),
            enabled: if d.enabled { "yes" } else { "no" },
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &util::Ctx,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let devices: Vec<Device> = ctx
                .client
                .list_switches()
                .await?
                .into_iter()
                .map(Device::from)
                .collect();
            let out = output::render_list(
                global.output,
                &devices,
                |d| DeviceRow::from(d),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add {
            ip_address,
            name,
            community,
            allow_port_zero,
        } => {
            if !ctx.session.is_admin() {
                return Err(CoreError::Forbidden.into());
            }

            let req = CreateDeviceRequest {
                name,
                ip_address,
                community,
                allow_port_zero,
            };

            // Registration probes the device over SNMP and can stall on
            // an unreachable address; Ctrl-C aborts it cleanly.
            let cancel = CancellationToken::new();
            let canceller = cancel.clone();
            let ctrl_c = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    canceller.cancel();
                }
            });

            let result = ctx.client.create_switch(&req, &cancel).await;
            ctrl_c.abort();

            match result {
                Ok(device) => {
                    if !global.quiet {
                        eprintln!(
                            "Device '{}' registered (id {}, {} ports detected)",
                            device.name, device.id, device.detected_ports
                        );
                    }
                    Ok(())
                }
                Err(portglass_api::Error::Cancelled) => {
                    eprintln!("Registration cancelled");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }

        DevicesCommand::Rm { id } => {
            if !util::confirm(&format!("Delete device {id}? This is destructive."), global.yes)? {
                return Ok(());
            }
            ctx.client.delete_switch(id).await?;
            if !global.quiet {
                eprintln!("Device deleted");
            }
            Ok(())
        }

        DevicesCommand::Sync { id } => {
            let device = ctx.client.sync_switch(id).await?;
            if !global.quiet {
                eprintln!(
                    "Sync complete: {} ports detected, {} sections",
                    device.detected_ports,
                    device.config.sections.as_deref().map_or(0, |s| s.len())
                );
            }
            Ok(())
        }
    }
}

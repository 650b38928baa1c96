//! Continuous polling view: drives a `Poller` and prints one line per
//! applied snapshot until Ctrl-C.

use portglass_core::{MonitorConfig, Poller, layout};

use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(ctx: &util::Ctx, args: &WatchArgs) -> Result<(), CliError> {
    let monitor = MonitorConfig {
        always_poll: ctx.monitor.always_poll || args.always_poll,
        ..ctx.monitor.clone()
    };
    let interval = monitor.poll_interval;

    let poller = Poller::new(ctx.client.clone(), monitor);
    let mut snapshots = poller.snapshots();
    let history = poller.history();

    poller.start(args.device).await;
    eprintln!(
        "Polling device {} every {}s -- Ctrl-C to stop",
        args.device,
        interval.as_secs()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(snapshot) = snapshots.borrow_and_update().clone() else {
                    continue;
                };

                let summary = layout::usage_summary(&snapshot.sections);
                let now = chrono::Local::now().format("%H:%M:%S");
                let mut line = format!(
                    "{now}  {}/{} up ({:.1}%)",
                    summary.up,
                    summary.total,
                    summary.usage_percent()
                );

                if let Some(ref if_name) = args.port {
                    match layout::find_port(&snapshot.sections, if_name) {
                        Some(port) => {
                            let samples = history.get(if_name).len();
                            line.push_str(&format!(
                                "  {if_name}: in {} out {} [{samples} samples]",
                                output::format_rate(port.in_rate),
                                output::format_rate(port.out_rate),
                            ));
                        }
                        None => line.push_str(&format!("  {if_name}: not in snapshot")),
                    }
                }

                println!("{line}");
            }
        }
    }

    poller.stop().await;
    eprintln!("Stopped");
    Ok(())
}

//! Terminal output for the repair shop: colored narration and run summaries.
//!
//! Uses `console` for styling. [`ConsoleSink`] prints each workflow event
//! as it happens; `tracing` only sees it at debug level.

use console::Style;
use tracing::debug;

use crate::shop::{EventSink, ShopEvent, VehicleStatus};
use crate::workshop::RequestOutcome;

/// Prints narration lines to stdout.
///
/// Success is green, failures and rejections red, work in progress yellow.
pub struct ConsoleSink {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    fn marker(&self, event: &ShopEvent) -> String {
        match event {
            ShopEvent::RepairSucceeded { .. } => self.green.apply_to("✓").to_string(),
            ShopEvent::FinalStatusReported { status, .. } => {
                self.status_style(*status).apply_to("■").to_string()
            }
            e if e.is_failure() => self.red.apply_to("✗").to_string(),
            ShopEvent::RepairStarted { .. } => self.yellow.apply_to("↻").to_string(),
            _ => self.dim.apply_to("•").to_string(),
        }
    }

    fn status_style(&self, status: VehicleStatus) -> &Style {
        match status {
            VehicleStatus::Fixed => &self.green,
            VehicleStatus::CannotFix => &self.red,
            _ => &self.yellow,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: ShopEvent) {
        println!("  {} {event}", self.marker(&event));
        debug!(%event, "narrated");
    }
}

/// One line per request, colored by final status.
pub fn print_summary(outcomes: &[RequestOutcome]) {
    let sink = ConsoleSink::new();
    println!();
    println!("{}", sink.dim.apply_to("─── Summary ───"));
    for outcome in outcomes {
        match outcome {
            RequestOutcome::Completed(report) => {
                let style = sink.status_style(report.final_status);
                println!(
                    "  {:<12} {:<10} {:<8} {:<8} {}",
                    report.client,
                    report.model,
                    report.vin,
                    report.mechanic,
                    style.apply_to(report.final_status)
                );
            }
            RequestOutcome::Rejected { client, reason } => {
                println!("  {client:<12} {}", sink.red.apply_to(reason));
            }
        }
    }
}

/// Prints the outcomes as pretty JSON.
pub fn print_json(outcomes: &[RequestOutcome]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(outcomes)?);
    Ok(())
}

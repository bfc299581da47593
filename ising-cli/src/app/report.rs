use super::HostSummary;
use tracing::info;

pub fn report_summary(summary: &HostSummary) {
    info!("Simulation finished.");
    info!("  Batches:  {}", summary.batches);
    info!("  Trials:   {}", summary.trials);
    let ratio = if summary.trials == 0 {
        0.0
    } else {
        summary.accepted as f64 / summary.trials as f64
    };
    info!("  Accepted: {} ({:.2}%)", summary.accepted, 100.0 * ratio);
    info!("  Elapsed:  {:.2} s", summary.seconds);
}

use orderbook_sim::{BookSnapshot, BookView, DisplayConfig};

use crate::cli::OutputFormat;

pub fn render(
    snapshot: &BookSnapshot,
    format: OutputFormat,
    max_rows: usize,
    display: &DisplayConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => {
            let view = BookView::from_snapshot(snapshot, max_rows, display.clone());
            Ok(format!("#{}\n{}", snapshot.sequence, view))
        }
        OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
    }
}

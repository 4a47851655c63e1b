//! # Receipt Commands
//!
//! Preview on screen, export to PDF, and the clock.

use quickbill_core::Presentation;
use tracing::info;

use crate::error::AppResult;
use crate::state::AppState;

/// Boxed preview of the receipt for the current order.
pub fn preview(state: &AppState) -> String {
    state
        .receipt_view()
        .render_text(state.config.receipt.width, Presentation::Preview)
}

/// Starts a background export. Completion is reported by the console loop.
pub fn export(state: &mut AppState) -> AppResult<String> {
    let view = state.receipt_view();
    let path = state.exporter.start(view)?;
    info!(path = %path.display(), "Export requested");
    Ok(format!("Exporting to {} ...\n", path.display()))
}

pub fn time(state: &AppState) -> String {
    let reading = state.reading();
    format!("{}  {}\n", reading.date, reading.time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::export::ExportEvent;
    use crate::state::test_support::state_in;
    use quickbill_core::MenuItem;
    use quickbill_core::Money;

    #[tokio::test]
    async fn test_preview_shows_placeholder_when_empty() {
        let (state, _events) = state_in(std::path::Path::new(".")).await;

        let text = preview(&state);
        assert!(text.contains("Ready for order..."));
        assert!(text.contains("DATE: 19 Oct 2026"));
        assert_eq!(time(&state), "19 Oct 2026  09:05\n");
    }

    #[tokio::test]
    async fn test_empty_export_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _events) = state_in(dir.path()).await;

        let err = export(&mut state).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(!state.exporter.is_exporting());
    }

    #[tokio::test]
    async fn test_export_writes_flat_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let (mut state, mut events) = state_in(dir.path()).await;
        state.order.add_item(&MenuItem::new("Samosa", Money::from_rupees(20)));

        let reply = export(&mut state).unwrap();
        assert!(reply.contains("Bill_1024_THE_SNACK_BAR.pdf"));

        let path = dir.path().join("Bill_1024_THE_SNACK_BAR.pdf");
        assert_eq!(
            events.recv().await.unwrap(),
            ExportEvent::Finished { path: path.clone() }
        );

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("INR 20.00"));
        assert!(!written.contains('░'));
        assert!(!state.exporter.is_exporting());
        state.exporter.wait_idle().await;
    }
}

//! # Receipt Export
//!
//! Writes the receipt to a PDF file without blocking the operator loop.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Export Flow                                     │
//! │                                                                         │
//! │  `export` command                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Exporter::start(view)                                                  │
//! │       ├── order empty? ──────────────► ExportError::EmptyOrder          │
//! │       ├── flag false→true (CAS) fails ► ExportError::InFlight           │
//! │       ▼                                                                 │
//! │  tokio::spawn ─► spawn_blocking(renderer.render(view, path))            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExportGuard dropped (flag = false), success or failure alike           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExportEvent::{Finished, Failed} ──mpsc──► operator loop prints it      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use quickbill_core::receipt::export_file_name;
use quickbill_core::{Presentation, ReceiptView};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

// =============================================================================
// Errors
// =============================================================================

/// Receipt export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export.
    #[error("Order is empty")]
    EmptyOrder,

    /// Another export has not finished yet.
    #[error("An export is already in progress")]
    InFlight,

    /// Writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF backend failed.
    #[error("Render failed: {0}")]
    Render(String),

    /// The export task panicked or was cancelled.
    #[error("Export task failed: {0}")]
    Task(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

// =============================================================================
// Renderer
// =============================================================================

/// Something that can write a receipt view to a file.
///
/// Runs on the blocking pool.
pub trait ReceiptRenderer: Send + Sync + 'static {
    fn render(&self, view: &ReceiptView, path: &Path) -> ExportResult<()>;
}

/// A4 portrait page size.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;

/// Courier glyphs are 0.6 em wide.
const COURIER_ADVANCE_EM: f32 = 0.6;
const MM_PER_PT: f32 = 0.352_778;
const MAX_FONT_PT: f32 = 14.0;
const LINE_SPACING: f32 = 1.25;

/// Renders the receipt as monospace text on A4 pages.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    width: usize,
}

impl PdfRenderer {
    /// `width` is the receipt line width in characters.
    pub fn new(width: usize) -> Self {
        PdfRenderer { width }
    }

    /// Largest font size (pt) at which a full line fits between the margins.
    fn font_size(columns: usize) -> f32 {
        let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let fitted = usable / (columns.max(1) as f32 * COURIER_ADVANCE_EM * MM_PER_PT);
        fitted.min(MAX_FONT_PT)
    }
}

fn render_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Render(e.to_string())
}

impl ReceiptRenderer for PdfRenderer {
    fn render(&self, view: &ReceiptView, path: &Path) -> ExportResult<()> {
        let text = view.render_text(self.width, Presentation::Export);
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(self.width);
        let font_size = Self::font_size(columns);
        let line_height = font_size * MM_PER_PT * LINE_SPACING;

        let title = format!("Bill #{} - {}", view.meta.bill_number, view.restaurant.name);
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Receipt",
        );
        let font = doc.add_builtin_font(BuiltinFont::Courier).map_err(render_err)?;

        let mut current = doc.get_page(page).get_layer(layer);
        let top = PAGE_HEIGHT_MM - MARGIN_MM - line_height;
        let mut y = top;
        for line in text.lines() {
            if y < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Receipt");
                current = doc.get_page(next_page).get_layer(next_layer);
                y = top;
            }
            current.use_text(line, font_size, Mm(MARGIN_MM), Mm(y), &font);
            y -= line_height;
        }

        let file = File::create(path)?;
        doc.save(&mut BufWriter::new(file)).map_err(render_err)?;
        Ok(())
    }
}

// =============================================================================
// In-flight guard
// =============================================================================

/// Holds the "exporting" flag while alive; clears it on drop.
#[derive(Debug)]
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    /// Claims the flag, or returns `None` if it is already set.
    pub fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ExportGuard { flag: Arc::clone(flag) })
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// Completion report sent back to the operator loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Finished { path: PathBuf },
    Failed { path: PathBuf, error: String },
}

/// Starts exports and tracks the one in flight.
pub struct Exporter {
    renderer: Arc<dyn ReceiptRenderer>,
    export_dir: PathBuf,
    in_flight: Arc<AtomicBool>,
    events: mpsc::Sender<ExportEvent>,
    task: Option<JoinHandle<()>>,
}

impl Exporter {
    /// Creates an exporter and the receiver its events arrive on.
    pub fn new(
        renderer: Arc<dyn ReceiptRenderer>,
        export_dir: impl Into<PathBuf>,
    ) -> (Self, mpsc::Receiver<ExportEvent>) {
        let (events, events_rx) = mpsc::channel(8);
        let exporter = Exporter {
            renderer,
            export_dir: export_dir.into(),
            in_flight: Arc::new(AtomicBool::new(false)),
            events,
            task: None,
        };
        (exporter, events_rx)
    }

    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Starts exporting `view` in the background.
    ///
    /// Returns the target path. Refuses empty receipts and a second export
    /// while one is running; nothing is started in either case.
    pub fn start(&mut self, view: ReceiptView) -> ExportResult<PathBuf> {
        if view.is_empty() {
            return Err(ExportError::EmptyOrder);
        }
        let guard = ExportGuard::try_acquire(&self.in_flight).ok_or(ExportError::InFlight)?;

        let path = self
            .export_dir
            .join(export_file_name(&view.restaurant.name, &view.meta.bill_number));
        info!(path = %path.display(), "Starting receipt export");

        let renderer = Arc::clone(&self.renderer);
        let events = self.events.clone();
        let target = path.clone();

        self.task = Some(tokio::spawn(async move {
            let out = target.clone();
            let result = tokio::task::spawn_blocking(move || renderer.render(&view, &out))
                .await
                .unwrap_or_else(|e| Err(ExportError::Task(e.to_string())));

            // Clear the flag before reporting so the loop sees a settled state.
            drop(guard);

            let event = match result {
                Ok(()) => {
                    info!(path = %target.display(), "Receipt exported");
                    ExportEvent::Finished { path: target }
                }
                Err(e) => {
                    error!(path = %target.display(), error = %e, "Receipt export failed");
                    ExportEvent::Failed {
                        path: target,
                        error: e.to_string(),
                    }
                }
            };
            if events.send(event).await.is_err() {
                debug!("Export event receiver dropped");
            }
        }));

        Ok(path)
    }

    /// Waits for the in-flight export, if any, to finish.
    pub async fn wait_idle(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Export task ended abnormally");
            }
        }
    }
}

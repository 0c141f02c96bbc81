//! Last-request-wins background analysis.
//!
//! Every submission takes a generation ticket. An analysis runs to
//! completion on the blocking pool; its result is forwarded only while its
//! ticket is still the current one, so a host never displays a report for
//! text the user has since edited.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::engine::{analyze, AnalysisContext};
use crate::error::Error;
use crate::report::AnalysisReport;

/// Identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Generation counter shared between the session and its tasks.
#[derive(Debug, Default)]
pub struct SessionState {
    generation: AtomicU64,
}

impl SessionState {
    /// Start a new generation and return its ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Whether `ticket` belongs to the latest generation.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

/// Result of a submission that was still current when it was queued.
///
/// An edit can land after queueing; hosts that must never show a stale
/// report can re-check with [`AnalysisSession::is_current`] on
/// [`SessionUpdate::ticket`].
#[derive(Debug)]
pub enum SessionUpdate {
    /// Analysis finished.
    Completed {
        /// The submission this report belongs to.
        ticket: Ticket,
        /// The finished report.
        report: Box<AnalysisReport>,
    },
    /// Analysis was refused or its task died.
    Failed {
        /// The submission that failed.
        ticket: Ticket,
        /// Why it failed.
        error: Error,
    },
}

impl SessionUpdate {
    /// The submission this update belongs to.
    pub const fn ticket(&self) -> Ticket {
        match self {
            Self::Completed { ticket, .. } | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Schedules analyses of an editor buffer, newest submission wins.
#[derive(Debug)]
pub struct AnalysisSession {
    ctx: Arc<AnalysisContext>,
    state: Arc<SessionState>,
    tx: mpsc::Sender<SessionUpdate>,
}

impl AnalysisSession {
    /// Create a session and the receiver its updates arrive on.
    pub fn new(ctx: Arc<AnalysisContext>) -> (Self, mpsc::Receiver<SessionUpdate>) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let session = Self {
            ctx,
            state: Arc::new(SessionState::default()),
            tx,
        };
        (session, rx)
    }

    /// Analyze a snapshot of `text` in the background.
    ///
    /// Must be called from within a tokio runtime. Any earlier submission
    /// still in flight becomes stale.
    pub fn submit(&self, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        let ticket = self.state.begin();
        let ctx = Arc::clone(&self.ctx);
        let state = Arc::clone(&self.state);
        let tx = self.tx.clone();
        tracing::debug!("Submitting analysis {ticket:?} ({} bytes)", text.len());

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || analyze(&text, &ctx)).await;
            let update = match result {
                Ok(Ok(report)) => SessionUpdate::Completed {
                    ticket,
                    report: Box::new(report),
                },
                Ok(Err(error)) => SessionUpdate::Failed { ticket, error },
                Err(e) => SessionUpdate::Failed {
                    ticket,
                    error: Error::Msg(format!("analysis task failed: {e}")),
                },
            };

            // Staleness is checked only once a slot is reserved
            let Ok(permit) = tx.reserve().await else {
                tracing::debug!("Session receiver dropped, result for {ticket:?} not delivered");
                return;
            };
            if !state.is_current(ticket) {
                tracing::warn!("Discarding stale analysis result {ticket:?}");
                return;
            }
            permit.send(update);
        })
    }

    /// Mark the buffer as edited so in-flight results are dropped.
    pub fn text_changed(&self) {
        self.state.invalidate();
    }

    /// Whether `ticket` is still the latest submission.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.state.is_current(ticket)
    }
}

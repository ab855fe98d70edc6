use attendance_api::AttendanceClient;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::poller::{PollEvent, PollTx, QrPoller};
use crate::session::Session;

mod action_queue;
mod actions;
mod event_loop;
mod views;

pub use event_loop::run_app;

/// Everything the event loop owns besides the UI state: the backend client,
/// the per-run session and the QR poller with its event channel.
pub struct Runtime {
    pub client: AttendanceClient,
    pub session: Session,
    poller: Option<QrPoller>,
    poll_tx: PollTx,
    poll_rx: UnboundedReceiver<PollEvent>,
    qr_interval: Duration,
}

impl Runtime {
    pub fn new(client: AttendanceClient, qr_interval: Duration) -> Self {
        let (poll_tx, poll_rx) = mpsc::unbounded_channel();
        Self {
            client,
            session: Session::new(),
            poller: None,
            poll_tx,
            poll_rx,
            qr_interval,
        }
    }

    /// Replaces any running poller.
    fn start_polling(&mut self, company_id: i64) {
        self.stop_polling();
        self.poller = Some(QrPoller::start(
            self.client.clone(),
            company_id,
            self.qr_interval,
            self.poll_tx.clone(),
        ));
    }

    fn stop_polling(&mut self) -> bool {
        match self.poller.take() {
            Some(poller) => {
                poller.stop();
                true
            }
            None => false,
        }
    }

    fn try_next_poll_event(&mut self) -> Option<PollEvent> {
        self.poll_rx.try_recv().ok()
    }
}

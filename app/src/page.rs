//! The page: a session plus the requests it has in flight.
//!
//! Requests run on the blocking pool; completions come back over a channel
//! and are applied here, one at a time. `in_flight` counts requests whose
//! completion has not been applied yet.

use books_core::{Event, HttpResponse, Outgoing, RequestToken, Session, Snapshot, Transport, TransportError};
use tokio::sync::mpsc;

type Completion = (RequestToken, Result<HttpResponse, TransportError>);

pub struct Page<T> {
    session: Session,
    transport: T,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<T> Page<T>
where
    T: Transport + Clone + Send + 'static,
{
    pub fn new(session: Session, transport: T) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            transport,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.session.snapshot()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn fire(&mut self, event: Event) {
        let outgoing = self.session.dispatch(event);
        self.spawn(outgoing);
    }

    /// Wait for the next completion and apply it. `None` when nothing is
    /// outstanding.
    pub async fn next_completion(&mut self) -> Option<()> {
        if self.in_flight == 0 {
            return None;
        }
        let (token, result) = self.rx.recv().await?;
        self.in_flight -= 1;
        let outgoing = self.session.complete(token, result);
        self.spawn(outgoing);
        Some(())
    }

    /// Apply completions until nothing is in flight, follow-ups included.
    /// `on_change` sees the page after each one.
    pub async fn settle(&mut self, mut on_change: impl FnMut(&Snapshot)) {
        while self.next_completion().await.is_some() {
            on_change(self.session.snapshot());
        }
    }

    fn spawn(&mut self, outgoing: Vec<Outgoing>) {
        for Outgoing { token, request } in outgoing {
            let transport = self.transport.clone();
            let tx = self.tx.clone();
            self.in_flight += 1;
            tracing::debug!(method = request.method.as_str(), target = %request.target(), "sending");
            tokio::task::spawn_blocking(move || {
                let result = transport.execute(&request);
                // The receiver lives as long as the page.
                let _ = tx.send((token, result));
            });
        }
    }
}

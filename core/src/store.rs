//! Client state container.
//!
//! # Design
//! `Snapshot` is an immutable value. `Snapshot::apply` takes one `Event`
//! and returns the next snapshot together with the `Effect`s (requests) the
//! host must perform. No I/O happens here; completions come back as events.
//!
//! Three guards make the event-driven model safe under overlapping requests:
//! - every fetch carries a `Ticket`; only the latest issued ticket may
//!   change the list or the error slot, so late completions are dropped.
//! - a submit while a create is outstanding is ignored.
//! - a delete for an id whose delete is outstanding is ignored.

use std::collections::BTreeSet;

use crate::types::{BookRecord, DraftField, DraftRecord, FilterCriteria};

/// Sequence number of a list fetch. Strictly increasing per store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

/// Which operation last failed. Display text belongs to `view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FetchFailed,
    CreateFailed,
    DeleteFailed,
}

/// Everything that can happen to the page: user input and request outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Page mount or explicit reload under the current filter.
    RefreshRequested,
    DraftEdited(DraftField, String),
    /// Raw contents of the title search input.
    TitleFilterChanged(String),
    /// Raw contents of the year input.
    YearFilterChanged(String),
    SubmitRequested,
    DeleteRequested(String),
    ListFetched { ticket: Ticket, books: Vec<BookRecord> },
    FetchFailed { ticket: Ticket },
    CreateSucceeded(BookRecord),
    CreateFailed,
    DeleteSucceeded(String),
    DeleteFailed(String),
}

/// Work the host must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { ticket: Ticket, filter: FilterCriteria },
    Create { draft: DraftRecord },
    Delete { id: String },
}

/// Result of applying one event.
#[derive(Debug, Clone)]
pub struct Transition {
    pub snapshot: Snapshot,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    books: Vec<BookRecord>,
    draft: DraftRecord,
    filter: FilterCriteria,
    error: Option<ErrorKind>,
    submitting: bool,
    deleting: BTreeSet<String>,
    latest_fetch: Ticket,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list exactly as the last accepted fetch returned it.
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    pub fn latest_fetch(&self) -> Ticket {
        self.latest_fetch
    }

    pub fn apply(&self, event: Event) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match event {
            Event::RefreshRequested => effects.push(next.issue_fetch()),
            Event::DraftEdited(field, value) => next.draft.set(field, value),
            Event::TitleFilterChanged(input) => {
                let title = FilterCriteria::title_from_input(&input);
                if title != next.filter.title {
                    next.filter.title = title;
                    effects.push(next.issue_fetch());
                }
            }
            Event::YearFilterChanged(input) => {
                let year = FilterCriteria::year_from_input(&input);
                if year != next.filter.year {
                    next.filter.year = year;
                    effects.push(next.issue_fetch());
                }
            }
            Event::SubmitRequested => {
                if next.submitting {
                    tracing::debug!("submit ignored: create already in flight");
                } else {
                    next.submitting = true;
                    effects.push(Effect::Create { draft: next.draft.clone() });
                }
            }
            Event::DeleteRequested(id) => {
                if !next.books.iter().any(|book| book.id == id) {
                    tracing::warn!(%id, "delete ignored: id not displayed");
                } else if !next.deleting.insert(id.clone()) {
                    tracing::debug!(%id, "delete ignored: already in flight");
                } else {
                    effects.push(Effect::Delete { id });
                }
            }
            Event::ListFetched { ticket, books } => {
                if next.accepts(ticket) {
                    tracing::debug!(ticket = ticket.0, count = books.len(), "list replaced");
                    next.books = books;
                    next.error = None;
                }
            }
            Event::FetchFailed { ticket } => {
                if next.accepts(ticket) {
                    tracing::warn!(ticket = ticket.0, "fetch failed");
                    next.error = Some(ErrorKind::FetchFailed);
                }
            }
            Event::CreateSucceeded(book) => {
                tracing::debug!(id = %book.id, "book created");
                next.submitting = false;
                next.draft.reset();
                next.error = None;
                effects.push(next.issue_fetch());
            }
            Event::CreateFailed => {
                tracing::warn!("create failed; draft kept");
                next.submitting = false;
                next.error = Some(ErrorKind::CreateFailed);
            }
            Event::DeleteSucceeded(id) => {
                tracing::debug!(%id, "book deleted");
                next.deleting.remove(&id);
                next.error = None;
                effects.push(next.issue_fetch());
            }
            Event::DeleteFailed(id) => {
                tracing::warn!(%id, "delete failed");
                next.deleting.remove(&id);
                next.error = Some(ErrorKind::DeleteFailed);
            }
        }

        Transition { snapshot: next, effects }
    }

    fn issue_fetch(&mut self) -> Effect {
        self.latest_fetch = self.latest_fetch.next();
        Effect::Fetch {
            ticket: self.latest_fetch,
            filter: self.filter.clone(),
        }
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        if ticket == self.latest_fetch {
            return true;
        }
        tracing::debug!(
            ticket = ticket.0,
            latest = self.latest_fetch.0,
            "stale fetch completion discarded"
        );
        false
    }
}

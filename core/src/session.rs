//! Glue between the state container and the HTTP client.
//!
//! # Design
//! `Session` keeps the current `Snapshot` and turns each `Effect` into an
//! `HttpRequest` tagged with a `RequestToken`. The host executes requests in
//! any order and hands each response back through `complete`, which parses it
//! and applies the matching success or failure event. Every failure, whether
//! transport, status, or body, ends in the error slot and never propagates.
//!
//! Hosts that are happy to block can implement `Transport` and call `run`.

use std::collections::VecDeque;

use crate::client::BookClient;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::store::{Effect, Event, Snapshot, Ticket, Transition};

/// Identifies which operation an outstanding request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestToken {
    Fetch(Ticket),
    Create,
    Delete(String),
}

/// A request the host must execute, and the token to complete it with.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub token: RequestToken,
    pub request: HttpRequest,
}

/// Executes one HTTP round-trip. Non-2xx statuses are responses, not errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct Session {
    client: BookClient,
    snapshot: Snapshot,
}

impl Session {
    pub fn new(client: BookClient) -> Self {
        Self {
            client,
            snapshot: Snapshot::new(),
        }
    }

    pub fn client(&self) -> &BookClient {
        &self.client
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Apply `event` and return the requests it calls for.
    pub fn dispatch(&mut self, event: Event) -> Vec<Outgoing> {
        let mut pending = VecDeque::from([event]);
        let mut outgoing = Vec::new();

        while let Some(event) = pending.pop_front() {
            let Transition { snapshot, effects } = self.snapshot.apply(event);
            self.snapshot = snapshot;
            for effect in effects {
                match self.request_for(effect) {
                    Ok(out) => outgoing.push(out),
                    Err(failed) => pending.push_back(failed),
                }
            }
        }
        outgoing
    }

    /// Feed back the outcome of a request previously returned by `dispatch`.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<HttpResponse, TransportError>,
    ) -> Vec<Outgoing> {
        let result = result.map_err(ApiError::from);
        let event = match token {
            RequestToken::Fetch(ticket) => {
                match result.and_then(|r| self.client.parse_list_books(r)) {
                    Ok(books) => Event::ListFetched { ticket, books },
                    Err(error) => {
                        tracing::warn!(ticket = ticket.value(), %error, "list request failed");
                        Event::FetchFailed { ticket }
                    }
                }
            }
            RequestToken::Create => match result.and_then(|r| self.client.parse_create_book(r)) {
                Ok(book) => Event::CreateSucceeded(book),
                Err(error) => {
                    tracing::warn!(%error, "create request failed");
                    Event::CreateFailed
                }
            },
            RequestToken::Delete(id) => match result.and_then(|r| self.client.parse_delete_book(r)) {
                Ok(()) => Event::DeleteSucceeded(id),
                Err(error) => {
                    tracing::warn!(%id, %error, "delete request failed");
                    Event::DeleteFailed(id)
                }
            },
        };
        self.dispatch(event)
    }

    /// Dispatch `event`, then execute every resulting request (and the ones
    /// those trigger) one at a time until nothing is outstanding.
    pub fn run<T: Transport + ?Sized>(&mut self, event: Event, transport: &T) {
        let mut queue: VecDeque<Outgoing> = self.dispatch(event).into();
        while let Some(Outgoing { token, request }) = queue.pop_front() {
            tracing::debug!(method = request.method.as_str(), target = %request.target(), "executing");
            let result = transport.execute(&request);
            queue.extend(self.complete(token, result));
        }
    }

    /// Build the request for an effect, or the failure event if it cannot be
    /// built.
    fn request_for(&self, effect: Effect) -> Result<Outgoing, Event> {
        match effect {
            Effect::Fetch { ticket, filter } => Ok(Outgoing {
                token: RequestToken::Fetch(ticket),
                request: self.client.build_list_books(&filter),
            }),
            Effect::Create { draft } => match self.client.build_create_book(&draft) {
                Ok(request) => Ok(Outgoing {
                    token: RequestToken::Create,
                    request,
                }),
                Err(error) => {
                    tracing::error!(%error, "could not encode draft");
                    Err(Event::CreateFailed)
                }
            },
            Effect::Delete { id } => Ok(Outgoing {
                request: self.client.build_delete_book(&id),
                token: RequestToken::Delete(id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::store::ErrorKind;

    fn session() -> Session {
        Session::new(BookClient::new("http://localhost:3000"))
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn refresh_produces_tagged_list_request() {
        let mut s = session();
        let out = s.dispatch(Event::RefreshRequested);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].request.method, HttpMethod::Get);
        assert!(matches!(out[0].token, RequestToken::Fetch(_)));
    }

    #[test]
    fn transport_error_becomes_fetch_failure() {
        let mut s = session();
        let out = s.dispatch(Event::RefreshRequested);
        let next = s.complete(out[0].token.clone(), Err(TransportError::new("refused")));
        assert!(next.is_empty());
        assert_eq!(s.snapshot().error(), Some(ErrorKind::FetchFailed));
    }

    #[test]
    fn bad_body_becomes_fetch_failure() {
        let mut s = session();
        let out = s.dispatch(Event::RefreshRequested);
        s.complete(out[0].token.clone(), ok(200, "<html>"));
        assert_eq!(s.snapshot().error(), Some(ErrorKind::FetchFailed));
    }

    #[test]
    fn odd_rows_do_not_fail_the_whole_list() {
        let mut s = session();
        let out = s.dispatch(Event::RefreshRequested);
        let body = r#"[{"id":7,"title":"Dune","author":"Herbert","publishedDate":"1965-06-01","description":null},
                       {"id":"8","title":"Emma","author":null,"publishedDate":null,"description":""}]"#;
        s.complete(out[0].token.clone(), ok(200, body));
        assert_eq!(s.snapshot().error(), None);
        let ids: Vec<&str> = s.snapshot().books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["7", "8"]);
    }

    #[test]
    fn create_success_yields_follow_up_fetch() {
        let mut s = session();
        let out = s.dispatch(Event::SubmitRequested);
        assert_eq!(out[0].token, RequestToken::Create);
        let body = r#"{"id":"1","title":"","author":"","publishedDate":"","description":""}"#;
        let next = s.complete(RequestToken::Create, ok(201, body));
        assert_eq!(next.len(), 1);
        assert!(matches!(next[0].token, RequestToken::Fetch(_)));
    }

    #[test]
    fn out_of_order_completions_keep_newest_list() {
        let mut s = session();
        let older = s.dispatch(Event::TitleFilterChanged("D".to_string())).remove(0);
        let newer = s.dispatch(Event::TitleFilterChanged("Dune".to_string())).remove(0);

        let dune = r#"[{"id":"42","title":"Dune","author":"Herbert","publishedDate":"1965-06-01","description":"Sci-fi"}]"#;
        s.complete(newer.token, ok(200, dune));
        s.complete(older.token, ok(200, "[]"));
        assert_eq!(s.snapshot().books().len(), 1);
        assert_eq!(s.snapshot().books()[0].title, "Dune");
    }
}

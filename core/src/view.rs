//! Presentation: error text, date formatting, and the page as plain text.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::store::{ErrorKind, Snapshot};
use crate::types::BookRecord;

pub fn error_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::FetchFailed => "Failed to fetch books. Please try again later.",
        ErrorKind::CreateFailed => "Failed to add book. Please try again.",
        ErrorKind::DeleteFailed => "Failed to delete book. Please try again.",
    }
}

/// Render a service date as `M/D/YYYY`.
///
/// Accepts a bare `YYYY-MM-DD`, an RFC 3339 timestamp, or a timestamp with no
/// offset. Offset timestamps are read in UTC so midnight dates do not shift a
/// day; offset-less ones are taken as written.
pub fn display_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc().date()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        });
    match date {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

pub fn render_book(book: &BookRecord) -> String {
    format!(
        "{}\n  by {} - {}\n  {}\n  [{}]",
        book.title,
        book.author,
        display_date(&book.published_date),
        book.description,
        book.id
    )
}

/// The whole page: banner, form, filters, then the list.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::from("Book Management System\n");

    if let Some(kind) = snapshot.error() {
        let _ = writeln!(out, "! {}", error_message(kind));
    }

    let draft = snapshot.draft();
    let _ = writeln!(
        out,
        "draft: title={:?} author={:?} date={:?} desc={:?}{}",
        draft.title,
        draft.author,
        draft.published_date,
        draft.description,
        if snapshot.is_submitting() { " (adding...)" } else { "" }
    );

    let filter = snapshot.filter();
    let year = filter.year.map(|y| y.to_string());
    let _ = writeln!(
        out,
        "search: {:?}  year: {}",
        filter.title.as_deref().unwrap_or(""),
        year.as_deref().unwrap_or("-")
    );

    if snapshot.books().is_empty() {
        out.push_str("(no books)\n");
    }
    for book in snapshot.books() {
        out.push_str(&render_book(book));
        if snapshot.is_deleting(&book.id) {
            out.push_str(" (deleting...)");
        }
        out.push('\n');
    }
    out
}

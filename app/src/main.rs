//! Terminal front end for the books service.
//!
//! Reads one command per line, dispatches it into the page, and runs every
//! resulting request on the blocking pool. Completions are applied on this
//! task, so state changes are sequential while input stays responsive. The
//! page is re-rendered after each change. When stdin ends, requests still in
//! flight are awaited before exiting; `quit` leaves at once.

mod command;
mod config;
mod page;

use anyhow::Context;
use books_core::{view, BookClient, Event, Session, UreqTransport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};
use crate::config::Settings;
use crate::page::Page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let settings = Settings::load().context("failed to load settings")?;
    tracing::info!(api = %settings.api_url, timeout = ?settings.timeout, "starting");

    let transport = UreqTransport::new(settings.timeout);
    let mut page = Page::new(Session::new(BookClient::new(&settings.api_url)), transport);

    println!("{HELP}\n");
    page.fire(Event::RefreshRequested);
    print!("{}", view::render(page.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    tracing::debug!(in_flight = page.in_flight(), "stdin closed");
                    page.settle(|snapshot| print!("{}", view::render(snapshot))).await;
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(command) => {
                        if let Some(event) = command.into_event() {
                            page.fire(event);
                        }
                        print!("{}", view::render(page.snapshot()));
                    }
                    Err(error) => println!("{error}"),
                }
            }
            Some(()) = page.next_completion(), if page.in_flight() > 0 => {
                print!("{}", view::render(page.snapshot()));
            }
        }
    }

    tracing::info!("bye");
    Ok(())
}

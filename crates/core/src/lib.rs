//! Schedule watcher and booking sequencer for MyFitness group classes.
//!
//! The crate drives one browser session through the weekly booking flow:
//! log in, wait for the Sunday-evening schedule release, advance to the new
//! week's timetable, and register every open slot of the configured class.
//! The browser itself sits behind the [`Browser`] trait; `fitbook-webdriver`
//! provides the real implementation, tests script a mock.
//!
//! One run owns exactly one browser session for its whole lifetime; the
//! [`run`] orchestrator releases it on every exit path.

mod booking;
mod browser;
mod config;
mod discovery;
mod error;
mod run;
mod schedule;
mod selectors;
mod session;
#[cfg(test)]
mod testing;
mod wait;
mod watcher;

pub use booking::{BookingFailure, BookingResult, extract_class_id};
pub use browser::Browser;
pub use config::{BotConfig, Credentials, ReleaseSpec, WatcherTiming};
pub use discovery::BookableClass;
pub use error::{Error, Result};
pub use run::{RunReport, run};
pub use session::BookingSession;
pub use wait::{Lookup, wait_for, wait_for_url, wait_gone};
pub use watcher::{Phase, SnapshotWatch, next_release_instant};
pub use webdriver::{By, Element};

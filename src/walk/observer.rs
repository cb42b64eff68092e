use std::fmt::Display;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::types::{Move, Position};

/// Something that happened while walking a maze
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WalkEvent {
    /// exploration from `position` is starting
    Enter {
        #[allow(missing_docs)]
        position: Position,
        #[allow(missing_docs)]
        step: u32,
    },
    /// `position` was just marked as reached at `step`, moving `direction` from `from`
    Mark {
        #[allow(missing_docs)]
        from: Position,
        #[allow(missing_docs)]
        direction: Move,
        #[allow(missing_docs)]
        position: Position,
        #[allow(missing_docs)]
        step: u32,
    },
    /// every direction from `position` has been tried
    Exit {
        #[allow(missing_docs)]
        position: Position,
    },
}

/// Gets told about every event of a walk, after the grid has been updated for it
pub trait WalkObserver<G: ?Sized> {
    #[allow(missing_docs)]
    fn observe(&mut self, event: &WalkEvent, grid: &G);
}

/// Observer that does not do anything
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopObserver;

impl<G: ?Sized> WalkObserver<G> for NoopObserver {
    fn observe(&mut self, _event: &WalkEvent, _grid: &G) {}
}

/// Keeps every event so a walk can be compared against a reference trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecorder {
    /// events in the order they happened
    pub events: Vec<WalkEvent>,
}

impl TraceRecorder {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// just the marking events, as (position, step)
    pub fn marks(&self) -> Vec<(Position, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WalkEvent::Mark { position, step, .. } => Some((*position, *step)),
                _ => None,
            })
            .collect()
    }
}

impl<G: ?Sized> WalkObserver<G> for TraceRecorder {
    fn observe(&mut self, event: &WalkEvent, _grid: &G) {
        self.events.push(*event);
    }
}

/// Writes a progress line for every event, and the rendered grid after every mark.
///
/// The first write error stops all further output; get it back from [PrintingObserver::into_inner].
#[derive(Debug)]
pub struct PrintingObserver<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PrintingObserver<W> {
    #[allow(missing_docs)]
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// prints the banner and the untouched grid
    pub fn announce_start<G: Display + ?Sized>(&mut self, grid: &G) {
        self.emit(|out| {
            writeln!(out, "starting exploration")?;
            writeln!(out, "{}", grid)
        });
    }

    /// prints the finished grid and the closing banner
    pub fn announce_finish<G: Display + ?Sized>(&mut self, grid: &G) {
        self.emit(|out| {
            writeln!(out, "{}", grid)?;
            writeln!(out, "exploration finished")
        });
    }

    /// hand back the writer, or the first error hit while writing to it
    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn emit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.out) {
            self.error = Some(e);
        }
    }
}

impl<W: Write, G: Display + ?Sized> WalkObserver<G> for PrintingObserver<W> {
    fn observe(&mut self, event: &WalkEvent, grid: &G) {
        self.emit(|out| match event {
            WalkEvent::Enter { position, .. } => {
                writeln!(out, "starting exploration from {}", position)
            }
            WalkEvent::Mark {
                direction, step, ..
            } => {
                writeln!(out, "moving {} (step={})", direction, step)?;
                writeln!(out, "{}", grid)
            }
            WalkEvent::Exit { position } => {
                writeln!(out, "finished exploration from {}", position)
            }
        });
    }
}

//! Core event types and channel helpers for oxpad.
//!
//! All state mutation happens on the single consumer of the runtime channel;
//! producers (the input task, the tick source, upload reads) only send
//! [`Event`]s.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// The event loop uses a bounded mpsc channel sized by `EVENT_CHANNEL_CAP`. Producers await `send`
// and therefore park when the loop falls behind instead of dropping keystrokes.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 8192;

/// Input task counters, read at shutdown and by tests.
#[derive(Debug)]
pub struct InputStats {
    pub keypresses: AtomicU64,
    pub pastes: AtomicU64,
    pub paste_bytes: AtomicU64,
    pub send_failures: AtomicU64,
    pub task_starts: AtomicU64,
    pub task_stops: AtomicU64,
}

impl InputStats {
    const fn new() -> Self {
        Self {
            keypresses: AtomicU64::new(0),
            pastes: AtomicU64::new(0),
            paste_bytes: AtomicU64::new(0),
            send_failures: AtomicU64::new(0),
            task_starts: AtomicU64::new(0),
            task_stops: AtomicU64::new(0),
        }
    }

    pub fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    /// Log the current totals once, at shutdown.
    pub fn log_summary(&self) {
        tracing::info!(
            target: "runtime.shutdown",
            keypresses = self.keypresses.load(Ordering::Relaxed),
            pastes = self.pastes.load(Ordering::Relaxed),
            paste_bytes = self.paste_bytes.load(Ordering::Relaxed),
            send_failures = self.send_failures.load(Ordering::Relaxed),
            "input_stats"
        );
    }
}

pub static INPUT_STATS: InputStats = InputStats::new();

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// Completion of an asynchronous upload read.
    FileLoaded(FileLoad),
    /// Periodic monotonic tick; drives auto-save and status message expiry.
    Tick,
}

/// Normalized input events.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Interrupt (Ctrl-C) surfaced distinctly from ordinary chords.
    CtrlC,
    /// Complete bracketed paste payload. Never logged verbatim; log length only.
    Paste(String),
}

/// Result of reading an upload from disk.
#[derive(Debug, Clone)]
pub struct FileLoad {
    pub path: PathBuf,
    pub result: Result<String, FileLoadError>,
}

/// Cloneable summary of an I/O failure (`std::io::Error` is not `Clone`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoadError {
    pub kind: std::io::ErrorKind,
    pub message: String,
}

impl From<std::io::Error> for FileLoadError {
    fn from(e: std::io::Error) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl fmt::Display for FileLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// -------------------------------------------------------------------------------------------------
// Async Event Sources
// -------------------------------------------------------------------------------------------------

/// Trait implemented by any async event producer. Implementors usually hold configuration and
/// spawn one background task that pushes `Event`s into the shared channel.
pub trait AsyncEventSource: Send + 'static {
    /// Human-readable stable identifier (used for logging / diagnostics).
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task. Implementors must stop when
    /// `tx.send(..).await` returns Err (channel closed).
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }
    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }
    /// Spawn all registered sources, returning their JoinHandles. Each source receives its own
    /// clone of `tx`; during shutdown the caller drops its last `Sender` before awaiting the
    /// handles so the sources observe the closed channel and exit.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            tracing::info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Built-in monotonic tick source. Emits `Event::Tick` every configured interval.
pub struct TickEventSource {
    interval: std::time::Duration,
}

impl TickEventSource {
    pub fn new(interval: std::time::Duration) -> Self {
        Self { interval }
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let dur = self.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(dur);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
            }
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Keys
// -------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }
}

/// Logical key identities consumed by the key translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

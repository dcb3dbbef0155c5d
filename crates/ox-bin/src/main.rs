//! oxpad entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{Effect, io_ops, translate_key, translate_paste};
use core_config::{Config, load_from};
use core_events::{
    EVENT_CHANNEL_CAP, Event, EventSourceRegistry, FileLoad, INPUT_STATS, InputEvent,
    TickEventSource,
};
use core_render::{RenderEngine, text_rows};
use core_storage::{FileStore, STORAGE_FILE_NAME};
use core_terminal::{Terminal, TerminalCapabilities};
use session::Session;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod session;

const LOG_FILE_NAME: &str = "oxpad.log";
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "oxpad", version, about = "Plain-text terminal editor with auto-save")]
struct Args {
    /// Configuration file path (overrides discovery of `oxpad.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Storage file holding the auto-saved document.
    #[arg(long = "storage")]
    pub storage: Option<PathBuf>,
    /// Directory that receives `edited-file.txt` on save.
    #[arg(long = "export-dir")]
    pub export_dir: Option<PathBuf>,
    /// Start with an empty document instead of the auto-saved one.
    #[arg(long = "no-restore")]
    pub no_restore: bool,
}

struct AppStartup {
    terminal: Terminal,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    session: Session<FileStore>,
    terminal_guard: core_terminal::ScreenGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            terminal: Terminal::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: Args) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();

        info!(target: "runtime", "startup");
        let config = load_from(args.config.clone())?;
        let session = Self::build_session(&args, &config);

        self.terminal.set_title("oxpad")?;
        let guard = self.terminal.enter_guard()?;

        info!(
            target: "runtime.startup",
            config_override = args.config.is_some(),
            storage_override = args.storage.is_some(),
            no_restore = args.no_restore,
            autosave = config.autosave().enabled,
            search_mode = ?config.search_mode(),
            "bootstrap_complete"
        );
        Ok(RuntimeContext {
            session,
            terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }

        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn build_session(args: &Args, config: &Config) -> Session<FileStore> {
        let store = resolve_store(args.storage.clone(), config.file.storage.path.clone());
        info!(target: "storage", path = %store.path().display(), "store_selected");
        let export_dir = resolve_export_dir(args.export_dir.clone(), config.file.export.dir.clone());
        let mut session = Session::new(config, store, export_dir);
        if !args.no_restore {
            session.restore(Instant::now());
        }
        session
    }
}

/// Storage location precedence: CLI flag, config file, platform data dir,
/// and finally the working directory.
fn resolve_store(cli: Option<PathBuf>, configured: Option<PathBuf>) -> FileStore {
    if let Some(path) = cli.or(configured) {
        return FileStore::new(path);
    }
    FileStore::at_default_location().unwrap_or_else(|e| {
        warn!(target: "storage", error = %e, "default_location_unavailable");
        FileStore::new(STORAGE_FILE_NAME)
    })
}

fn resolve_export_dir(cli: Option<PathBuf>, configured: Option<PathBuf>) -> PathBuf {
    cli.or(configured)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

struct EditorRuntime<'a> {
    session: Session<FileStore>,
    render_engine: RenderEngine,
    size: (u16, u16),
    rx: mpsc::Receiver<Event>,
    tx: Option<mpsc::Sender<Event>>,
    source_handles: Vec<tokio::task::JoinHandle<()>>,
    input_task: Option<tokio::task::JoinHandle<()>>,
    input_shutdown: Option<core_input::AsyncInputShutdown>,
    _terminal_guard: core_terminal::ScreenGuard<'a>,
}

enum LoopControl {
    Continue { dirty: bool },
    Break { reason: ShutdownReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    CtrlC,
    ActionQuit,
    ChannelClosed,
}

impl ShutdownReason {
    fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::CtrlC => "ctrl_c",
            ShutdownReason::ActionQuit => "action_quit",
            ShutdownReason::ChannelClosed => "channel_closed",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn log_shutdown_stage(reason: ShutdownReason, stage: &'static str) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        stage = stage,
        "shutdown_stage"
    );
}

fn log_render_summary(reason: ShutdownReason, frames: u64) {
    info!(
        target: "runtime.shutdown",
        reason = reason.as_str(),
        frames,
        "render_summary"
    );
}

#[inline]
fn log_paste(content: &str) {
    tracing::debug!(
        target: "input.paste",
        size_bytes = content.len(),
        char_count = content.chars().count(),
        "paste_commit"
    );
}

impl<'a> EditorRuntime<'a> {
    fn new(
        context: RuntimeContext<'a>,
        tx: mpsc::Sender<Event>,
        rx: mpsc::Receiver<Event>,
        input_task: tokio::task::JoinHandle<()>,
        input_shutdown: core_input::AsyncInputShutdown,
        source_handles: Vec<tokio::task::JoinHandle<()>>,
    ) -> Self {
        let RuntimeContext {
            session,
            terminal_guard,
        } = context;
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            session,
            render_engine: RenderEngine::new(TerminalCapabilities::detect()),
            size,
            rx,
            tx: Some(tx),
            source_handles,
            input_task: Some(input_task),
            input_shutdown: Some(input_shutdown),
            _terminal_guard: terminal_guard,
        }
    }

    async fn run(&mut self) -> Result<()> {
        self.render();

        let loop_span = tracing::debug_span!(target: "runtime", "event_loop");
        let _enter_loop = loop_span.enter();

        let mut shutdown_reason = ShutdownReason::ChannelClosed;
        while let Some(event) = self.rx.recv().await {
            let control = match &event {
                Event::Input(input) => self.handle_input_event(input),
                Event::FileLoaded(load) => self.handle_file_loaded(load.clone()),
                Event::Tick => self.handle_tick(),
            };

            match control {
                LoopControl::Break { reason } => {
                    shutdown_reason = reason;
                    break;
                }
                LoopControl::Continue { dirty } => {
                    if dirty {
                        self.render();
                    }
                }
            }
        }

        self.rx.close();
        self.finalize_shutdown(shutdown_reason).await;
        Ok(())
    }

    async fn finalize_shutdown(&mut self, reason: ShutdownReason) {
        log_shutdown_stage(reason, "begin");
        self.session.finish();
        log_shutdown_stage(reason, "session_flushed");

        if let Some(tx) = self.tx.take() {
            trace!(
                target: "runtime.shutdown",
                reason = reason.as_str(),
                "dropping_runtime_sender"
            );
            drop(tx);
        }

        while let Some(handle) = self.source_handles.pop() {
            match tokio::time::timeout(Duration::from_millis(200), handle).await {
                Ok(Ok(_)) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_stopped"
                ),
                Ok(Err(err)) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_cancelled"
                ),
                Ok(Err(err)) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "event_source_task_error"
                ),
                Err(_) => warn!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "event_source_task_timeout"
                ),
            }
        }

        if let Some(shutdown) = self.input_shutdown.take() {
            shutdown.signal();
        }

        if let Some(handle) = self.input_task.take() {
            match handle.await {
                Ok(_) => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_joined"
                ),
                Err(err) if err.is_cancelled() => trace!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    "input_task_cancelled"
                ),
                Err(err) => error!(
                    target: "runtime.shutdown",
                    reason = reason.as_str(),
                    ?err,
                    "input_task_join_failed"
                ),
            }
        }

        INPUT_STATS.log_summary();
        log_render_summary(reason, self.render_engine.frames_rendered());
        log_shutdown_stage(reason, "complete");
    }

    fn page_rows(&self) -> usize {
        text_rows(self.size.1)
    }

    fn render(&mut self) {
        let rows = self.page_rows();
        self.session.model.auto_scroll(rows);
        let (w, h) = self.size;
        if let Err(e) = self.render_engine.render(&self.session.model, w, h) {
            error!(target: "render", ?e, "render_error");
        }
    }

    fn handle_input_event(&mut self, input: &InputEvent) -> LoopControl {
        match input {
            InputEvent::CtrlC => {
                info!(target: "runtime", "ctrl_c_quit");
                LoopControl::Break {
                    reason: ShutdownReason::CtrlC,
                }
            }
            InputEvent::Key(key) => {
                let prompt_active = self.session.model.view.prompt_active();
                match translate_key(prompt_active, key) {
                    Some(action) => self.apply_action(action),
                    None => {
                        trace!(target: "runtime", %key, "unbound_key");
                        LoopControl::Continue { dirty: false }
                    }
                }
            }
            InputEvent::Paste(text) => {
                log_paste(text);
                let prompt_active = self.session.model.view.prompt_active();
                match translate_paste(prompt_active, text) {
                    Some(action) => self.apply_action(action),
                    None => LoopControl::Continue { dirty: false },
                }
            }
            InputEvent::Resize(w, h) => {
                self.size = (*w, *h);
                trace!(target: "runtime", width = w, height = h, "resize");
                LoopControl::Continue { dirty: true }
            }
        }
    }

    fn apply_action(&mut self, action: core_actions::Action) -> LoopControl {
        let page_rows = self.page_rows();
        let result = self.session.dispatch(action, page_rows, Instant::now());
        if result.quit {
            return LoopControl::Break {
                reason: ShutdownReason::ActionQuit,
            };
        }
        if let Some(Effect::ReadFile(path)) = result.effect {
            self.spawn_upload_read(path);
        }
        LoopControl::Continue {
            dirty: result.dirty,
        }
    }

    /// Read the upload off the loop; completion arrives as `Event::FileLoaded`.
    fn spawn_upload_read(&mut self, path: PathBuf) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        info!(target: "io", path = %path.display(), "upload_requested");
        tokio::spawn(async move {
            let load: FileLoad = io_ops::read_upload(path).await;
            if tx.send(Event::FileLoaded(load)).await.is_err() {
                warn!(target: "io", "upload_result_dropped_channel_closed");
            }
        });
    }

    fn handle_file_loaded(&mut self, load: FileLoad) -> LoopControl {
        self.session.apply_file_load(load, Instant::now());
        LoopControl::Continue { dirty: true }
    }

    fn handle_tick(&mut self) -> LoopControl {
        LoopControl::Continue {
            dirty: self.session.tick(Instant::now()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let context = startup.run(args)?;
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::new(TICK_INTERVAL));
    let source_handles = registry.spawn_all(&tx);

    let mut runtime =
        EditorRuntime::new(context, tx, rx, input_task, input_shutdown, source_handles);
    runtime.run().await
}

//! Command dispatcher for flagbind tools.
//!
//! An [`App`] holds an ordered list of handlers, each guarded by a matcher
//! over the raw arguments. Running the app picks the first handler whose
//! matcher accepts the arguments (or the default handler), runs it against
//! an interrupt signal and hands whichever outcome arrives first to the
//! shutdown hook. The hook's return value is the result of the run.

pub mod context;
pub mod logging;
pub mod signal;

use std::future::Future;

use futures::future::{BoxFuture, FutureExt};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

pub use context::Context;
pub use logging::LogLevel;

/// Error type for app runs
#[derive(Debug, Error)]
pub enum AppError {
    #[error("handler not found")]
    HandlerNotFound,

    #[error("context canceled")]
    Cancelled,

    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// Type alias for app results
pub type Result<T> = std::result::Result<T, AppError>;

/// Decides whether a handler accepts the arguments.
pub type Matcher = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Runs a command. Receives every argument after the program name.
pub type Handler = Box<dyn Fn(Context, Vec<String>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Receives the outcome of a run and produces the final result.
pub type ShutdownHandler = Box<dyn FnOnce(Result<()>) -> Result<()> + Send>;

struct Route {
    matcher: Matcher,
    handler: Handler,
}

/// Matcher accepting arguments that begin with `words`.
pub fn starts_with(words: &[&str]) -> impl Fn(&[String]) -> bool + Send + Sync + 'static {
    let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    move |args: &[String]| args.len() >= words.len() && args.iter().zip(&words).all(|(arg, word)| arg == word)
}

fn boxed_handler<H, F>(handler: H) -> Handler
where
    H: Fn(Context, Vec<String>) -> F + Send + Sync + 'static,
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move |ctx, args| handler(ctx, args).boxed())
}

/// Routes a process invocation to one of its registered handlers.
pub struct App {
    default_handler: Option<Handler>,
    routes: Vec<Route>,
    shutdown_handler: ShutdownHandler,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an app with no handlers and a shutdown hook that discards
    /// the outcome.
    pub fn new() -> Self {
        Self {
            default_handler: None,
            routes: Vec::new(),
            shutdown_handler: Box::new(|_| Ok(())),
        }
    }

    /// Register a handler chosen when `matcher` accepts the arguments.
    /// Handlers are tried in registration order.
    pub fn add_handler<M, H, F>(&mut self, matcher: M, handler: H)
    where
        M: Fn(&[String]) -> bool + Send + Sync + 'static,
        H: Fn(Context, Vec<String>) -> F + Send + Sync + 'static,
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.routes.push(Route {
            matcher: Box::new(matcher),
            handler: boxed_handler(handler),
        });
    }

    /// Register a handler chosen when the first argument is `name`.
    pub fn add_sub_command<H, F>(&mut self, name: &str, handler: H)
    where
        H: Fn(Context, Vec<String>) -> F + Send + Sync + 'static,
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.add_handler(starts_with(&[name]), handler);
    }

    /// Register the handler used when no matcher accepts the arguments.
    pub fn add_default_handler<H, F>(&mut self, handler: H)
    where
        H: Fn(Context, Vec<String>) -> F + Send + Sync + 'static,
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.default_handler = Some(boxed_handler(handler));
    }

    /// Replace the shutdown hook.
    pub fn add_shutdown_handler<S>(&mut self, hook: S)
    where
        S: FnOnce(Result<()>) -> Result<()> + Send + 'static,
    {
        self.shutdown_handler = Box::new(hook);
    }

    /// Run with the process arguments until completion or SIGINT/SIGTERM.
    pub async fn run(self) -> Result<()> {
        let mut argv = std::env::args();
        let program = argv.next().unwrap_or_default();
        self.run_with(program, argv.collect(), signal::shutdown_signal())
            .await
    }

    /// Run with explicit arguments, racing the handler against `shutdown`.
    pub async fn run_with<S>(self, program: impl Into<String>, args: Vec<String>, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        let App {
            default_handler,
            routes,
            shutdown_handler,
        } = self;

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = Context::new(program.into(), cancel_rx);

        let handler = match routes.iter().position(|route| (route.matcher)(args.as_slice())) {
            Some(index) => {
                debug!(route = index, "dispatching to matched handler");
                Some(&routes[index].handler)
            }
            None => {
                debug!("dispatching to default handler");
                default_handler.as_ref()
            }
        };

        let work: BoxFuture<'static, Result<()>> = match handler {
            Some(handler) => handler(ctx, args).map(|result| result.map_err(AppError::Handler)).boxed(),
            None => futures::future::ready(Err(AppError::HandlerNotFound)).boxed(),
        };

        let outcome = tokio::select! {
            biased;
            result = work => result,
            _ = shutdown => {
                info!("interrupted, cancelling");
                cancel_tx.send_replace(true);
                Err(AppError::Cancelled)
            }
        };

        shutdown_handler(outcome)
    }
}

//! Running a command off the caller's thread with a completion signal.
//!
//! A [`BackgroundTask`] runs a [`Command`] once and tells a
//! [`CompletionListener`] whether it succeeded. It is the glue a host
//! application uses to keep long analyses away from its event loop.

use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use crate::analyzers::{AnalysisReport, AnalysisRunner};
use crate::dataset::Dataset;

/// Error returned by a failing [`Command`].
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// A unit of work that runs synchronously and may fail.
pub trait Command: Send + 'static {
    type Output: Send + 'static;

    fn run(&mut self) -> Result<Self::Output, CommandError>;

    /// Name used in log records.
    fn name(&self) -> &str {
        "command"
    }
}

/// Outcome reported once per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// True iff the command returned without error.
    pub success: bool,
    /// Message of the error when `success` is false.
    pub error: Option<String>,
}

impl Completion {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Receives the [`Completion`] of a task.
pub trait CompletionListener: Send + Sync + 'static {
    fn record_completion(&self, completion: Completion);
}

impl<F> CompletionListener for F
where
    F: Fn(Completion) + Send + Sync + 'static,
{
    fn record_completion(&self, completion: Completion) {
        self(completion)
    }
}

/// Pairs a command with the listener told about its completion.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use column_analysis::background::{BackgroundTask, Command, CommandError, Completion};
///
/// struct Add(u32, u32);
///
/// impl Command for Add {
///     type Output = u32;
///     fn run(&mut self) -> Result<u32, CommandError> {
///         Ok(self.0 + self.1)
///     }
/// }
///
/// let seen = Arc::new(Mutex::new(None));
/// let sink = seen.clone();
/// let task = BackgroundTask::new(move |c: Completion| *sink.lock().unwrap() = Some(c), Add(2, 3));
///
/// assert_eq!(task.call(), Some(5));
/// assert_eq!(*seen.lock().unwrap(), Some(Completion::succeeded()));
/// ```
pub struct BackgroundTask<C, L> {
    listener: L,
    command: C,
}

impl<C, L> fmt::Debug for BackgroundTask<C, L>
where
    C: Command,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundTask")
            .field("command", &self.command.name())
            .finish_non_exhaustive()
    }
}

impl<C, L> BackgroundTask<C, L>
where
    C: Command,
    L: CompletionListener,
{
    pub fn new(listener: L, command: C) -> Self {
        Self { listener, command }
    }

    /// Runs the command on the current thread and notifies the listener.
    ///
    /// Returns the command output, or `None` when it failed; the failure is
    /// logged and passed to the listener.
    #[instrument(skip_all, fields(command = self.command.name()))]
    pub fn call(mut self) -> Option<C::Output> {
        match self.command.run() {
            Ok(output) => {
                debug!("Command completed");
                self.listener.record_completion(Completion::succeeded());
                Some(output)
            }
            Err(e) => {
                error!(error = %e, "Command failed");
                self.listener.record_completion(Completion::failed(&e));
                None
            }
        }
    }

    /// Runs [`call`](Self::call) on the tokio blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> JoinHandle<Option<C::Output>> {
        tokio::task::spawn_blocking(move || self.call())
    }

    /// Spawns the task and waits for it.
    ///
    /// A worker that panicked or was cancelled is reported as
    /// [`ColumnAnalysisError::Background`](crate::ColumnAnalysisError::Background).
    pub async fn join(self) -> crate::Result<Option<C::Output>> {
        Ok(self.spawn().await?)
    }
}

/// A [`Command`] running an [`AnalysisRunner`] over a shared dataset.
///
/// Fails when the runner stops on an error, so a fail-fast runner reports
/// `success = false`.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    runner: AnalysisRunner,
    dataset: Arc<Dataset>,
}

impl AnalysisJob {
    pub fn new(runner: AnalysisRunner, dataset: Arc<Dataset>) -> Self {
        Self { runner, dataset }
    }
}

impl Command for AnalysisJob {
    type Output = AnalysisReport;

    fn run(&mut self) -> Result<AnalysisReport, CommandError> {
        Ok(self.runner.run(self.dataset.rows())?)
    }

    fn name(&self) -> &str {
        "analysis"
    }
}

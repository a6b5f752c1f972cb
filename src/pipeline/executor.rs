//! Pipeline executor: owns the queue and supervises the two tasks.
//!
//! A run:
//! 1. Spawns the producer and consumer as named scoped threads borrowing the queue.
//! 2. Collects task exits from a crossbeam channel, in completion order.
//! 3. Once the producer is done, optionally bounds how long the consumer may
//!    keep draining before the queue is cancelled.
//! 4. Joins both threads and reports the first root-cause error, or a
//!    [`PipelineReport`].

use crate::config::PipelineConfig;
use crate::error::NumClassError;
use crate::pipeline::consumer::{Consumer, ConsumerSummary};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::node::Source;
use crate::pipeline::producer::Producer;
use crate::pipeline::queue::BoundedQueue;
use crate::pipeline::report::PipelineReport;
use crate::pipeline::router::Router;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

/// The two pipeline tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Producer,
    Consumer,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::Producer => "producer",
            Task::Consumer => "consumer",
        }
    }
}

/// Exit notification sent by a task thread, including on unwind.
#[derive(Debug, Clone, Copy)]
struct TaskExit {
    task: Task,
    panicked: bool,
}

/// Sends a [`TaskExit`] when dropped so panics are observed too.
struct ExitNotifier {
    task: Task,
    tx: Sender<TaskExit>,
}

impl Drop for ExitNotifier {
    fn drop(&mut self) {
        let _ = self.tx.send(TaskExit {
            task: self.task,
            panicked: thread::panicking(),
        });
    }
}

/// Single-use producer/consumer pipeline around one bounded queue.
pub struct Pipeline<T> {
    queue: BoundedQueue<T>,
    shutdown_timeout: Option<Duration>,
    started: AtomicBool,
}

impl<T: Send> Pipeline<T> {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        config
            .validate()
            .map_err(|e| match e {
                NumClassError::Config(msg) => PipelineError::Config(msg),
                other => PipelineError::Config(other.to_string()),
            })?;

        Ok(Self {
            queue: BoundedQueue::new(config.capacity)?,
            shutdown_timeout: config.shutdown_timeout(),
            started: AtomicBool::new(false),
        })
    }

    /// Pipeline with the given capacity and no shutdown deadline.
    pub fn with_capacity(capacity: usize) -> PipelineResult<Self> {
        Self::new(&PipelineConfig::default().with_capacity(capacity))
    }

    pub fn queue(&self) -> &BoundedQueue<T> {
        &self.queue
    }

    /// Abort a run in progress from another thread.
    pub fn cancel(&self) {
        tracing::warn!("Pipeline cancellation requested");
        self.queue.cancel();
    }

    /// Run the pipeline to completion. A pipeline can only run once.
    pub fn run<S>(&self, source: S, router: Router<T>) -> PipelineResult<PipelineReport>
    where
        S: Source<T>,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(PipelineError::AlreadyRun);
        }

        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        tracing::info!(
            "Pipeline starting: source '{}', {} routes, capacity {}",
            source.name(),
            router.len(),
            self.queue.capacity()
        );

        let queue = &self.queue;
        let (exit_tx, exit_rx) = crossbeam_channel::bounded(2);

        let (produced, summary, timed_out) = thread::scope(|scope| -> PipelineResult<_> {
            let producer_exit = ExitNotifier {
                task: Task::Producer,
                tx: exit_tx.clone(),
            };
            let producer = thread::Builder::new()
                .name(Task::Producer.name().to_string())
                .spawn_scoped(scope, move || {
                    let _exit = producer_exit;
                    Producer::new(queue, source).run()
                })?;

            let consumer_exit = ExitNotifier {
                task: Task::Consumer,
                tx: exit_tx,
            };
            let consumer = match thread::Builder::new()
                .name(Task::Consumer.name().to_string())
                .spawn_scoped(scope, move || {
                    let _exit = consumer_exit;
                    Consumer::new(queue, router).run()
                }) {
                Ok(handle) => handle,
                Err(e) => {
                    queue.cancel();
                    return Err(PipelineError::Io(e));
                }
            };

            let (order, timed_out) = self.supervise(&exit_rx);
            let produced = join(producer, Task::Producer);
            let summary = join(consumer, Task::Consumer);
            Ok((
                Tagged::new(Task::Producer, &order, produced),
                Tagged::new(Task::Consumer, &order, summary),
                timed_out,
            ))
        })?;

        if let Some(timeout) = timed_out {
            if summary.result.as_ref().is_err_and(PipelineError::is_cancellation) {
                return Err(PipelineError::ShutdownTimedOut(timeout));
            }
        }

        let (produced, summary) = first_error(produced, summary)?;
        let report = PipelineReport {
            started_at,
            elapsed: clock.elapsed(),
            produced,
            consumed: summary.consumed,
            routed: summary.counts,
        };
        tracing::info!(
            "Pipeline finished: {} produced, {} consumed in {:?}",
            report.produced,
            report.consumed,
            report.elapsed
        );
        Ok(report)
    }

    /// Wait for both task exits. Returns completion order and, if the
    /// shutdown deadline fired, the timeout that was exceeded.
    fn supervise(&self, exit_rx: &Receiver<TaskExit>) -> (Vec<Task>, Option<Duration>) {
        let mut order = Vec::with_capacity(2);
        let mut deadline: Option<Instant> = None;
        let mut timed_out = None;

        while order.len() < 2 {
            let exit = match deadline {
                Some(at) => match exit_rx.recv_deadline(at) {
                    Ok(exit) => exit,
                    Err(RecvTimeoutError::Timeout) => {
                        tracing::warn!(
                            "Consumer still draining {} items after {:?}, cancelling",
                            self.queue.len(),
                            self.shutdown_timeout.unwrap_or_default()
                        );
                        timed_out = self.shutdown_timeout;
                        self.queue.cancel();
                        deadline = None;
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                None => match exit_rx.recv() {
                    Ok(exit) => exit,
                    Err(_) => break,
                },
            };

            tracing::debug!("{} task exited", exit.task.name());
            order.push(exit.task);

            if exit.panicked {
                tracing::error!("{} task panicked, cancelling pipeline", exit.task.name());
                self.queue.cancel();
            } else if exit.task == Task::Producer && order.len() == 1 {
                if let Some(timeout) = self.shutdown_timeout {
                    deadline = Some(Instant::now() + timeout);
                }
            }
        }

        (order, timed_out)
    }
}

/// A task result tagged with its completion rank.
struct Tagged<R> {
    rank: usize,
    result: PipelineResult<R>,
}

impl<R> Tagged<R> {
    fn new(task: Task, order: &[Task], result: PipelineResult<R>) -> Self {
        let rank = order.iter().position(|t| *t == task).unwrap_or(order.len());
        Self { rank, result }
    }
}

fn join<R>(handle: ScopedJoinHandle<'_, PipelineResult<R>>, task: Task) -> PipelineResult<R> {
    handle.join().unwrap_or_else(|_| {
        Err(PipelineError::TaskPanicked {
            task: task.name(),
        })
    })
}

/// Pick the error to report: root causes before cancellations, then
/// whichever task finished first.
fn first_error(
    produced: Tagged<u64>,
    summary: Tagged<ConsumerSummary>,
) -> PipelineResult<(u64, ConsumerSummary)> {
    match (produced.result, summary.result) {
        (Ok(p), Ok(s)) => Ok((p, s)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(pe), Err(ce)) => {
            let producer_first = match (pe.is_cancellation(), ce.is_cancellation()) {
                (false, true) => true,
                (true, false) => false,
                _ => produced.rank <= summary.rank,
            };
            Err(if producer_first { pe } else { ce })
        }
    }
}

//! Cooperative host loop
//!
//! [`Runtime`] drives a single top-level [`Program`] the way a UI host
//! would: it owns the model, queues messages, executes commands, keeps
//! subscriptions current and advances a simulated clock.
//!
//! # Scheduling
//!
//! Everything runs on the calling thread. Messages are processed one at a
//! time in FIFO order; a [`Cmd::deliver`] issued while handling a message is
//! queued behind it and therefore runs on the next tick. Asynchronous tasks
//! run on a `futures` [`LocalPool`] and their outputs join the same queue.
//! Time only moves when [`Runtime::advance`] is called, which makes timer
//! and subscription behaviour fully deterministic.

use crate::cmd::Action;
use crate::config::RuntimeConfig;
use crate::errors::RuntimeError;
use crate::sub::{SubEvent, SubSource};
use crate::{Cmd, Html, Program, Sub};
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::FutureExt;
use futures::task::LocalSpawnExt;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

/// Single-threaded host loop for one program.
pub struct Runtime<F, M, Msg> {
    program: Program<F, M, Msg>,
    model: M,
    subscriptions: Sub<Msg>,
    queue: VecDeque<Msg>,
    /// Outputs of finished tasks, filled from inside the executor
    completed: Rc<RefCell<VecDeque<Msg>>>,
    pool: LocalPool,
    spawner: LocalSpawner,
    timers: BTreeMap<(Duration, u64), Msg>,
    timer_seq: u64,
    now: Duration,
    processed: usize,
    config: RuntimeConfig,
}

impl<F: 'static, M: Clone + 'static, Msg: 'static> Runtime<F, M, Msg> {
    /// Initialise `program` with `flags` and execute its initial command.
    ///
    /// Messages produced by the initial command are queued, not processed;
    /// call [`Runtime::run_until_idle`] to drain them.
    pub fn start(program: Program<F, M, Msg>, flags: F, config: RuntimeConfig) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let (model, cmd) = program.init(flags);
        let subscriptions = program.subscriptions(&model);

        tracing::debug!(
            model = std::any::type_name::<M>(),
            max_steps_per_drain = config.max_steps_per_drain,
            "runtime started"
        );

        let mut runtime = Self {
            program,
            model,
            subscriptions,
            queue: VecDeque::new(),
            completed: Rc::new(RefCell::new(VecDeque::new())),
            pool,
            spawner,
            timers: BTreeMap::new(),
            timer_seq: 0,
            now: Duration::ZERO,
            processed: 0,
            config,
        };
        runtime.execute(cmd);
        runtime
    }

    /// Current model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render the current model.
    pub fn view(&self) -> Html<Msg> {
        self.program.view(&self.model)
    }

    /// Subscriptions declared by the current model.
    pub fn subscriptions(&self) -> &Sub<Msg> {
        &self.subscriptions
    }

    /// Host clock, starting at zero.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Total number of messages processed since start.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether no message is waiting to be processed.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.completed.borrow().is_empty()
    }

    /// Queue a message without processing it.
    pub fn enqueue(&mut self, msg: Msg) {
        self.queue.push_back(msg);
    }

    /// Queue a message and drain the queue.
    pub fn send(&mut self, msg: Msg) -> Result<usize, RuntimeError> {
        self.enqueue(msg);
        self.run_until_idle()
    }

    /// Fire the `click` listener of element `id` in the current view.
    pub fn click(&mut self, id: &str) -> Result<usize, RuntimeError> {
        self.trigger(id, "click", "")
    }

    /// Fire the `input` listener of element `id` with `value`.
    pub fn input(&mut self, id: &str, value: &str) -> Result<usize, RuntimeError> {
        self.trigger(id, "input", value)
    }

    /// Fire an arbitrary listener in the current view and drain.
    pub fn trigger(&mut self, id: &str, event: &str, value: &str) -> Result<usize, RuntimeError> {
        let msg = self
            .view()
            .trigger(id, event, value)
            .ok_or_else(|| RuntimeError::target_not_found(id, event))?;
        self.send(msg)
    }

    /// Push `value` into port `name` and drain.
    ///
    /// Ports nobody subscribes to swallow the value.
    pub fn push_port(&mut self, name: &str, value: &str) -> Result<usize, RuntimeError> {
        let source = SubSource::Port(name.to_string());
        let messages = self
            .subscriptions
            .fire(&source, &SubEvent::Port(value.to_string()));
        tracing::debug!(port = name, listeners = messages.len(), "port value pushed");
        self.queue.extend(messages);
        self.run_until_idle()
    }

    /// Process queued messages and finished tasks until nothing is left.
    ///
    /// Returns the number of messages processed, or
    /// [`RuntimeError::StepBudgetExceeded`] once more than
    /// `max_steps_per_drain` messages were handled. The message that hit the
    /// budget stays queued.
    pub fn run_until_idle(&mut self) -> Result<usize, RuntimeError> {
        self.drain(self.config.max_steps_per_drain)
    }

    /// Move the clock forward by `by`, firing timers and periodic
    /// subscriptions in time order and draining after each firing.
    ///
    /// The whole call shares one `max_steps_per_drain` budget, so a timer
    /// that keeps re-arming itself at the current instant cannot stall the
    /// clock. When the budget runs out the clock stays at the last firing and
    /// unfired timers stay queued.
    pub fn advance(&mut self, by: Duration) -> Result<usize, RuntimeError> {
        let target = self.now + by;
        let budget = self.config.max_steps_per_drain;
        let mut steps = self.drain(budget)?;
        while let Some(due) = self.next_due(target) {
            if steps >= budget {
                return Err(self.budget_exceeded());
            }
            self.fire_due(due);
            steps += self.drain(budget - steps)?;
        }
        self.now = target;
        Ok(steps)
    }

    /// Drain the queue, dispatching at most `budget` messages.
    fn drain(&mut self, budget: usize) -> Result<usize, RuntimeError> {
        let mut steps = 0;
        loop {
            self.pool.run_until_stalled();
            self.collect_completed();

            let Some(msg) = self.queue.pop_front() else {
                break;
            };
            if steps >= budget {
                self.queue.push_front(msg);
                return Err(self.budget_exceeded());
            }
            self.dispatch(msg);
            steps += 1;
        }
        Ok(steps)
    }

    fn budget_exceeded(&self) -> RuntimeError {
        tracing::warn!(
            limit = self.config.max_steps_per_drain,
            queued = self.queue.len(),
            timers = self.timers.len(),
            "drain stopped at step budget"
        );
        RuntimeError::step_budget_exceeded(self.config.max_steps_per_drain)
    }

    fn dispatch(&mut self, msg: Msg) {
        if self.config.trace_messages {
            tracing::trace!(
                step = self.processed,
                msg = std::any::type_name::<Msg>(),
                "dispatching message"
            );
        }
        let (model, cmd) = self.program.update(msg, self.model.clone());
        self.subscriptions = self.program.subscriptions(&model);
        self.model = model;
        self.processed += 1;
        self.execute(cmd);
    }

    fn execute(&mut self, cmd: Cmd<Msg>) {
        for action in cmd.into_actions() {
            match action {
                Action::Deliver(msg) => self.queue.push_back(msg),
                Action::After { delay, msg } => {
                    self.timer_seq += 1;
                    self.timers.insert((self.now + delay, self.timer_seq), msg);
                }
                Action::Perform(task) => {
                    let completed = Rc::clone(&self.completed);
                    let task = task.map(move |msg| completed.borrow_mut().push_back(msg));
                    if let Err(e) = self.spawner.spawn_local(task) {
                        tracing::warn!(error = %e, "failed to spawn task");
                    }
                }
            }
        }
    }

    fn collect_completed(&mut self) {
        let mut completed = self.completed.borrow_mut();
        self.queue.extend(completed.drain(..));
    }

    fn next_due(&self, target: Duration) -> Option<Duration> {
        let timer = self.timers.keys().next().map(|(at, _)| *at);
        let tick = self
            .subscriptions
            .sources()
            .into_iter()
            .filter_map(|source| match source {
                SubSource::Every(interval) if !interval.is_zero() => {
                    Some(next_multiple(self.now, interval))
                }
                _ => None,
            })
            .min();
        timer
            .into_iter()
            .chain(tick)
            .min()
            .filter(|due| *due <= target)
    }

    fn fire_due(&mut self, due: Duration) {
        let mut fired = 0usize;
        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > due {
                break;
            }
            self.queue.push_back(entry.remove());
            fired += 1;
        }

        for source in self.subscriptions.sources() {
            if let SubSource::Every(interval) = source {
                let aligned = due.as_nanos() % interval.as_nanos().max(1) == 0;
                if !interval.is_zero() && due > self.now && aligned {
                    let messages = self.subscriptions.fire(
                        &SubSource::Every(interval),
                        &SubEvent::Tick { now: due },
                    );
                    fired += messages.len();
                    self.queue.extend(messages);
                }
            }
        }

        self.now = due;
        tracing::debug!(now = ?due, fired, "clock advanced");
    }
}

/// Smallest multiple of `interval` strictly after `now`.
fn next_multiple(now: Duration, interval: Duration) -> Duration {
    let periods = now.as_nanos() / interval.as_nanos() + 1;
    let nanos = periods.saturating_mul(interval.as_nanos());
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

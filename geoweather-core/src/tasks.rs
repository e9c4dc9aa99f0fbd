//! Keyed async task lifecycle
//!
//! Each spawned future resolves to an action that is sent back to the main
//! loop. Spawning under a key that is still running aborts the old task;
//! distinct keys run side by side. Finished tasks are pruned lazily.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::store::Action;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key scoped to one request generation, e.g. `weather#3`
    pub fn scoped(name: &str, generation: u64) -> Self {
        Self(format!("{name}#{generation}"))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> TaskManager<A> {
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task whose output action is sent to the loop.
    ///
    /// An unfinished task under the same key is aborted first.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.prune_finished();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // receiver gone means the loop is shutting down
            let _ = tx.send(action);
        });

        tracing::trace!(task = %key, "task spawned");
        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Send an action without spawning anything
    pub fn emit(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Number of tasks that have not finished yet
    pub fn running_count(&self) -> usize {
        self.tasks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn prune_finished(&mut self) {
        self.tasks.retain(|_, handle| !handle.is_finished());
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

//! Three-phase script execution.
//!
//! [§ 4.12.1.1 Processing model](https://html.spec.whatwg.org/multipage/scripting.html#script-processing-model)
//!
//! A parser runs scripts in three streams: blocking scripts in document
//! order, `async` scripts whenever they are ready, and `defer` scripts in
//! document order once parsing is done. The scheduler recreates that order
//! for markup that was inserted in one batch:
//!
//! 1. Sequential: each script replaces its marker and the next one waits
//!    until it has run (or failed to load).
//! 2. Async: each script replaces its marker; loading happens in a
//!    background task nobody waits for.
//! 3. Deferred: after one platform flush, like the sequential phase.
//!
//! Every phase shares the page's single thread. Borrows of the page are
//! released before any await.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use inlay_dom::NodeId;
use tokio::task::JoinSet;

use super::materialize::materialize;
use super::record::{ExecutionClass, ScriptRecord};
use crate::markers::find_marker;
use crate::page::{PageHandle, ScriptKind, ScriptStart};
use crate::platform::Platform;

/// Knobs of the classification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Module scripts without `async` run in the deferred phase.
    pub modules_defer_by_default: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            modules_defer_by_default: true,
        }
    }
}

/// Fire-and-forget tasks of `async` scripts.
///
/// Tracking is best effort: finished tasks are reaped when new ones are
/// spawned, and whatever is still running when this is dropped is detached
/// rather than aborted.
#[derive(Debug, Default)]
pub struct BackgroundScripts {
    tasks: RefCell<JoinSet<()>>,
}

impl BackgroundScripts {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the current `LocalSet`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a `tokio::task::LocalSet`.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let mut tasks = self.tasks.borrow_mut();
        while tasks.try_join_next().is_some() {}
        let _ = tasks.spawn_local(task);
    }

    /// Number of tasks spawned and not yet reaped.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Drop for BackgroundScripts {
    fn drop(&mut self) {
        self.tasks.get_mut().detach_all();
    }
}

/// Runs the scripts extracted from one render pass.
pub struct ScriptScheduler {
    page: PageHandle,
    platform: Rc<dyn Platform>,
    options: SchedulerOptions,
    background: Rc<BackgroundScripts>,
}

impl ScriptScheduler {
    /// A scheduler inserting into `page`, fetching through `platform` and
    /// parking `async` loads in `background`.
    #[must_use]
    pub fn new(
        page: PageHandle,
        platform: Rc<dyn Platform>,
        options: SchedulerOptions,
        background: Rc<BackgroundScripts>,
    ) -> Self {
        Self {
            page,
            platform,
            options,
            background,
        }
    }

    /// Replace the markers under `target` by live scripts, phase by phase.
    ///
    /// Resolves once every sequential and deferred script has run or failed.
    /// `async` scripts may still be loading at that point.
    pub async fn run(&self, target: NodeId, records: Vec<ScriptRecord>) {
        let mut sequential = Vec::new();
        let mut asynchronous = Vec::new();
        let mut deferred = Vec::new();
        for record in records {
            match ExecutionClass::of(&record, self.options) {
                ExecutionClass::Sequential => sequential.push(record),
                ExecutionClass::Async => asynchronous.push(record),
                ExecutionClass::Deferred => deferred.push(record),
            }
        }
        tracing::debug!(
            sequential = sequential.len(),
            asynchronous = asynchronous.len(),
            deferred = deferred.len(),
            "Scheduling scripts"
        );

        for record in &sequential {
            self.run_in_order(target, record).await;
        }

        for record in &asynchronous {
            if let ScriptStart::Fetch { url, kind } = self.start(target, record) {
                let page = Rc::clone(&self.page);
                let platform = Rc::clone(&self.platform);
                self.background.spawn(async move {
                    load_and_evaluate(&page, platform.as_ref(), &url, kind).await;
                });
            }
        }

        self.platform.flush().await;

        for record in &deferred {
            self.run_in_order(target, record).await;
        }
    }

    async fn run_in_order(&self, target: NodeId, record: &ScriptRecord) {
        match self.start(target, record) {
            ScriptStart::Executed => tokio::task::yield_now().await,
            ScriptStart::Fetch { url, kind } => {
                load_and_evaluate(&self.page, self.platform.as_ref(), &url, kind).await;
            }
            ScriptStart::Ignored => {}
        }
    }

    /// Swap the marker of `record` for a fresh script element.
    fn start(&self, target: NodeId, record: &ScriptRecord) -> ScriptStart {
        let mut page = self.page.borrow_mut();
        let Some(marker) = find_marker(page.dom(), target, &record.id) else {
            tracing::debug!(id = %record.id, "Script marker is gone; skipping");
            return ScriptStart::Ignored;
        };

        let started =
            materialize(page.dom_mut(), record).and_then(|script| page.replace_with_script(marker, script));
        started.unwrap_or_else(|e| {
            tracing::warn!(id = %record.id, error = %e, "Failed to insert script");
            ScriptStart::Ignored
        })
    }
}

/// Fetch an external script and run it. Load failures count as completion.
async fn load_and_evaluate(page: &PageHandle, platform: &dyn Platform, url: &str, kind: ScriptKind) {
    match platform.fetch_script(url).await {
        Ok(source) => {
            page.borrow_mut().evaluate(kind, &source, url);
        }
        Err(e) => tracing::warn!(src = %url, error = %e, "Failed to load script"),
    }
}

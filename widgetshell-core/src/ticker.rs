//! Periodic tick registration for views.
//!
//! Views register a callback and hold on to the returned [`TickHandle`];
//! dropping the handle (or calling [`TickHandle::cancel`]) stops the ticks,
//! so no scheduled work outlives the view that asked for it.

use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default redraw period for panels that show the time.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Cancels the scheduled callback when dropped.
#[must_use = "dropping the handle cancels the tick immediately"]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn cancel(self) {
        // Drop does the work.
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        debug!("tick cancelled");
        self.task.abort();
    }
}

/// Run `callback` once per `period`, starting immediately. The callback gets
/// the tick number, counting from zero.
///
/// The callback runs on the current thread, so this must be called from
/// inside a [`tokio::task::LocalSet`].
pub fn schedule<F>(period: Duration, mut callback: F) -> TickHandle
where
    F: FnMut(u64) + 'static,
{
    debug!("tick scheduled every {:?}", period);
    let task = tokio::task::spawn_local(async move {
        let mut interval = tokio::time::interval(period);
        // A late tick only means a late redraw; don't burst to catch up.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut count = 0u64;
        loop {
            interval.tick().await;
            callback(count);
            count += 1;
        }
    });

    TickHandle { task }
}

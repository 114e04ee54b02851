use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{MissedTickBehavior, interval};

use crate::networking::{ApiError, ServerInfo, ServerStatus, StatusSource};
use crate::status::PollKind;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub enum PollUpdate {
    Servers {
        kind: PollKind,
        result: Result<(ServerStatus, ServerInfo), ApiError>,
    },
    Stats(Result<ServerStatus, ApiError>),
}

/// Owns a running poll loop; dropping it stops the loop and any request still
/// in flight.
pub struct PollerHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        info!("poller {}: stopping", self.name);
        self.task.abort();
    }
}

/// Poll `/status` and `/info` together; the first tick fires immediately and
/// counts as the initial load.
pub fn spawn_server_poller<S: StatusSource>(
    runtime: &Handle,
    source: Arc<S>,
    every: Duration,
    updates: mpsc::UnboundedSender<PollUpdate>,
) -> PollerHandle {
    spawn_ticker(runtime, "servers", every, move |kind| {
        let source = source.clone();
        let updates = updates.clone();
        async move {
            let result = source.fetch_snapshot().await;
            let _ = updates.send(PollUpdate::Servers { kind, result });
        }
    })
}

/// Poll `/status` alone for the stats banner.
pub fn spawn_stats_poller<S: StatusSource>(
    runtime: &Handle,
    source: Arc<S>,
    every: Duration,
    updates: mpsc::UnboundedSender<PollUpdate>,
) -> PollerHandle {
    spawn_ticker(runtime, "stats", every, move |_| {
        let source = source.clone();
        let updates = updates.clone();
        async move {
            let result = source.fetch_status().await;
            let _ = updates.send(PollUpdate::Stats(result));
        }
    })
}

fn spawn_ticker<F, Fut>(
    runtime: &Handle,
    name: &'static str,
    every: Duration,
    mut on_tick: F,
) -> PollerHandle
where
    F: FnMut(PollKind) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    info!("poller {name}: every {}s", every.as_secs_f32());
    let task = runtime.spawn(async move {
        // Each tick runs on its own so a hung request never delays the next one.
        let mut in_flight = JoinSet::new();
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut kind = PollKind::Initial;
        loop {
            ticker.tick().await;
            while in_flight.try_join_next().is_some() {}
            debug!(
                "poller {name}: {kind:?} tick ({} still in flight)",
                in_flight.len()
            );
            in_flight.spawn(on_tick(kind));
            kind = PollKind::Background;
        }
    });
    PollerHandle { name, task }
}

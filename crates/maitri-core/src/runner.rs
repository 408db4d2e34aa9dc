//! Runs a Dashboard as an independent tokio task, driven by real time.

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::dashboard::Dashboard;
use crate::events::DashboardEvent;
use crate::types::DashboardSnapshot;

/// Messages that can be sent TO the dashboard task (from a frontend).
#[derive(Debug)]
pub enum DashboardCommand {
    Submit(String),
    SetInputFocus(bool),
    TriggerAlert,
    DismissAlert,
    Snapshot(oneshot::Sender<DashboardSnapshot>),
    Teardown,
    Stop,
}

/// Frontend-side handle. Doubles as the debug handle: trigger, dismiss and
/// read-only inspection.
#[derive(Clone)]
pub struct DashboardHandle {
    command_tx: mpsc::Sender<DashboardCommand>,
    event_tx: broadcast::Sender<DashboardEvent>,
}

impl DashboardHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.event_tx.subscribe()
    }

    pub async fn send(&self, cmd: DashboardCommand) {
        if self.command_tx.send(cmd).await.is_err() {
            warn!("Dashboard task is gone; command dropped");
        }
    }

    pub async fn trigger_alert(&self) {
        self.send(DashboardCommand::TriggerAlert).await;
    }

    pub async fn dismiss_alert(&self) {
        self.send(DashboardCommand::DismissAlert).await;
    }

    /// None if the dashboard task has stopped.
    pub async fn snapshot(&self) -> Option<DashboardSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(DashboardCommand::Snapshot(tx))
            .await
            .ok()?;
        rx.await.ok()
    }
}

/// Spawn the dashboard task and return a handle to it.
///
/// The config is validated first: a zero tick or timer period is rejected
/// here rather than killing the task later.
pub fn spawn(dashboard: Dashboard) -> Result<(DashboardHandle, JoinHandle<()>)> {
    dashboard
        .config()
        .validate()
        .context("Refusing to start dashboard")?;
    let (command_tx, command_rx) = mpsc::channel(32);
    let handle = DashboardHandle {
        command_tx,
        event_tx: dashboard.event_sender(),
    };
    let task = tokio::spawn(run(dashboard, command_rx));
    Ok((handle, task))
}

/// Main loop: apply commands as they arrive, advance virtual time on every tick.
async fn run(mut dashboard: Dashboard, mut command_rx: mpsc::Receiver<DashboardCommand>) {
    if let Err(e) = dashboard.start() {
        warn!("Dashboard timers not started: {}", e);
    }

    let mut interval = tokio::time::interval(dashboard.config().tick());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                let Some(cmd) = cmd else { break };
                match cmd {
                    DashboardCommand::Submit(text) => {
                        if let Err(e) = dashboard.submit(&text) {
                            warn!("Submit rejected: {}", e);
                        }
                    }
                    DashboardCommand::SetInputFocus(focused) => dashboard.set_input_focus(focused),
                    DashboardCommand::TriggerAlert => dashboard.trigger_alert(),
                    DashboardCommand::DismissAlert => dashboard.dismiss_alert(),
                    DashboardCommand::Snapshot(reply) => {
                        let _ = reply.send(dashboard.snapshot());
                    }
                    DashboardCommand::Teardown => {
                        dashboard.teardown();
                    }
                    DashboardCommand::Stop => break,
                }
            }
            _ = interval.tick() => {
                let now = Instant::now();
                dashboard.advance(now - last);
                last = now;
            }
        }
    }

    info!("Dashboard shutting down after {}ms", dashboard.now().as_millis());
}

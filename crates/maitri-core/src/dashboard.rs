//! The dashboard context. Owns chat history, alert state, telemetry and
//! every timer. Constructed explicitly; nothing is looked up ambiently.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::alert::{self, AlertEffect, AlertInput};
use crate::chat::{ChatError, ChatHistory};
use crate::config::Config;
use crate::events::DashboardEvent;
use crate::responder;
use crate::scheduler::{ScheduleError, Scheduler, TaskId};
use crate::telemetry;
use crate::types::*;

/// Work items the dashboard schedules for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Display refresh tick
    Telemetry,
    /// Initial alert delay and the recurring re-arm both raise the alert
    RaiseAlert,
    AutoDismiss,
    /// Deliver the canned reply to this user input
    Reply(String),
}

pub struct Dashboard {
    config: Config,
    rng: StdRng,
    scheduler: Scheduler<Task>,
    event_tx: broadcast::Sender<DashboardEvent>,

    history: ChatHistory,
    alert: AlertState,
    telemetry: TelemetrySnapshot,
    input_focused: bool,
    pending_replies: usize,

    started: bool,
    telemetry_task: Option<TaskId>,
    auto_dismiss_task: Option<TaskId>,
}

impl Dashboard {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build with a caller-provided random source (seeded in tests).
    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            config,
            rng,
            scheduler: Scheduler::new(),
            event_tx,
            history: ChatHistory::new(),
            alert: AlertState::Calm,
            telemetry: TelemetrySnapshot::default(),
            input_focused: false,
            pending_replies: 0,
            started: false,
            telemetry_task: None,
            auto_dismiss_task: None,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.event_tx.subscribe()
    }

    pub fn event_sender(&self) -> broadcast::Sender<DashboardEvent> {
        self.event_tx.clone()
    }

    fn broadcast(&self, event: DashboardEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Arm the telemetry refresh, the initial alert and the alert re-arm.
    /// Calling it again is a no-op. On error nothing has been armed.
    pub fn start(&mut self) -> Result<(), ScheduleError> {
        if self.started {
            return Ok(());
        }
        let interval = self.config.telemetry_interval();
        let rearm = self.config.alert_rearm_period();
        if interval.is_zero() || rearm.is_zero() {
            return Err(ScheduleError::ZeroPeriod);
        }
        self.telemetry_task = Some(
            self.scheduler
                .schedule_every(interval, interval, Task::Telemetry)?,
        );
        self.scheduler
            .schedule_once(self.config.alert_initial_delay(), Task::RaiseAlert);
        self.scheduler
            .schedule_every(rearm, rearm, Task::RaiseAlert)?;
        self.started = true;
        info!("MAITRI dashboard initialized - mission ready");
        Ok(())
    }

    /// Cancel the recurring telemetry refresh. Other timers keep running.
    pub fn teardown(&mut self) -> bool {
        match self.telemetry_task.take() {
            Some(id) => {
                let cancelled = self.scheduler.cancel(id);
                info!("Telemetry refresh stopped");
                cancelled
            }
            None => false,
        }
    }

    // ── Chat ──

    /// Record a user message and schedule the canned reply.
    pub fn submit(&mut self, text: &str) -> Result<ChatMessage, ChatError> {
        let message = self.history.push_user(text)?.clone();
        self.broadcast(DashboardEvent::Message(message.clone()));

        let delay = self.reply_delay();
        self.scheduler
            .schedule_once(delay, Task::Reply(message.text.clone()));
        self.pending_replies += 1;
        if self.pending_replies == 1 {
            self.broadcast(DashboardEvent::Typing(TypingData { active: true }));
        }
        debug!("Reply scheduled in {}ms", delay.as_millis());
        Ok(message)
    }

    fn reply_delay(&mut self) -> Duration {
        let jitter = self.config.reply_delay_jitter_ms;
        let extra = if jitter == 0 {
            0
        } else {
            self.rng.gen_range(0..jitter)
        };
        self.config.reply_delay_min() + Duration::from_millis(extra)
    }

    fn deliver_reply(&mut self, prompt: &str) {
        let reply = responder::respond(prompt, &mut self.rng);
        let message = self.history.push_assistant(reply).clone();
        self.broadcast(DashboardEvent::Message(message));

        self.pending_replies = self.pending_replies.saturating_sub(1);
        if self.pending_replies == 0 {
            self.broadcast(DashboardEvent::Typing(TypingData { active: false }));
        }
    }

    pub fn set_input_focus(&mut self, focused: bool) {
        self.input_focused = focused;
    }

    // ── Alert ──

    pub fn trigger_alert(&mut self) {
        self.apply_alert(AlertInput::Raise);
    }

    pub fn dismiss_alert(&mut self) {
        self.apply_alert(AlertInput::Dismiss);
    }

    fn apply_alert(&mut self, input: AlertInput) {
        let t = alert::transition(self.alert, input);
        if t.is_noop() {
            debug!("Alert {:?} ignored while {}", input, self.alert);
            return;
        }
        self.alert = t.state;

        for effect in t.effects {
            match effect {
                AlertEffect::Publish(mood) => {
                    info!("Alert state -> {}", self.alert);
                    self.broadcast(DashboardEvent::Alert(AlertData {
                        state: self.alert,
                        mood,
                        confidence_tag: mood.confidence_tag().to_string(),
                    }));
                }
                AlertEffect::ArmAutoDismiss => {
                    self.auto_dismiss_task = Some(
                        self.scheduler
                            .schedule_once(self.config.alert_auto_dismiss(), Task::AutoDismiss),
                    );
                }
                AlertEffect::CancelAutoDismiss => {
                    if let Some(id) = self.auto_dismiss_task.take() {
                        self.scheduler.cancel(id);
                    }
                }
            }
        }
    }

    // ── Time ──

    /// Advance virtual time and run every task that comes due.
    ///
    /// Tasks are handled one at a time at their own due time, so anything a
    /// handler schedules (auto-dismiss, say) can still fire within the step.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now() + by;
        let mut count = 0;
        while let Some(f) = self.scheduler.pop_due(target) {
            count += 1;
            match f.task {
                Task::Telemetry => {
                    self.telemetry = telemetry::sample(&mut self.rng);
                    self.broadcast(DashboardEvent::Telemetry(self.telemetry.clone()));
                }
                Task::RaiseAlert => self.trigger_alert(),
                Task::AutoDismiss => {
                    // Already removed from the scheduler.
                    self.auto_dismiss_task = None;
                    self.dismiss_alert();
                }
                Task::Reply(prompt) => self.deliver_reply(&prompt),
            }
        }
        self.scheduler.settle(target);
        count
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    // ── Inspection ──

    pub fn alert_state(&self) -> AlertState {
        self.alert
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.history.messages()
    }

    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Number of timers currently armed.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            alert: self.alert,
            typing: self.is_typing(),
            input_focused: self.input_focused,
            message_count: self.history.len(),
            telemetry: self.telemetry.clone(),
            telemetry_running: self
                .telemetry_task
                .is_some_and(|id| self.scheduler.is_pending(id)),
            elapsed_ms: self.scheduler.now().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::with_rng(Config::default(), StdRng::seed_from_u64(1))
    }

    fn drain(rx: &mut broadcast::Receiver<DashboardEvent>) -> Vec<DashboardEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    fn alert_events(events: &[DashboardEvent]) -> Vec<AlertState> {
        events
            .iter()
            .filter_map(|e| match e {
                DashboardEvent::Alert(a) => Some(a.state),
                _ => None,
            })
            .collect()
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_raise_then_auto_dismiss() {
        let mut d = dashboard();
        let mut rx = d.subscribe();

        d.trigger_alert();
        assert_eq!(d.alert_state(), AlertState::Alerting);
        d.advance(secs(12));
        assert_eq!(d.alert_state(), AlertState::Calm);

        let events = drain(&mut rx);
        assert_eq!(
            alert_events(&events),
            vec![AlertState::Alerting, AlertState::Calm]
        );
    }

    #[test]
    fn test_raise_while_alerting_is_noop() {
        let mut d = dashboard();
        let mut rx = d.subscribe();

        d.trigger_alert();
        d.trigger_alert();
        assert_eq!(d.alert_state(), AlertState::Alerting);
        assert_eq!(alert_events(&drain(&mut rx)), vec![AlertState::Alerting]);
    }

    #[test]
    fn test_dismiss_while_calm_is_noop() {
        let mut d = dashboard();
        let mut rx = d.subscribe();

        d.dismiss_alert();
        assert_eq!(d.alert_state(), AlertState::Calm);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_manual_dismiss_cancels_auto_dismiss() {
        let mut d = dashboard();
        let mut rx = d.subscribe();

        d.trigger_alert();
        d.advance(secs(5));
        d.dismiss_alert();
        d.trigger_alert();
        // The first alert's auto-dismiss would have fired at t=12.
        d.advance(secs(8));
        assert_eq!(d.alert_state(), AlertState::Alerting);
        d.advance(secs(4));
        assert_eq!(d.alert_state(), AlertState::Calm);

        assert_eq!(
            alert_events(&drain(&mut rx)),
            vec![
                AlertState::Alerting,
                AlertState::Calm,
                AlertState::Alerting,
                AlertState::Calm
            ]
        );
    }

    #[test]
    fn test_scheduled_alert_cycle() {
        let mut d = dashboard();
        let mut rx = d.subscribe();
        d.start().unwrap();

        d.advance(secs(7));
        assert_eq!(d.alert_state(), AlertState::Calm);
        d.advance(secs(1));
        assert_eq!(d.alert_state(), AlertState::Alerting);
        d.advance(secs(12));
        assert_eq!(d.alert_state(), AlertState::Calm);
        // Re-arm fires at t=45.
        d.advance(secs(25));
        assert_eq!(d.alert_state(), AlertState::Alerting);

        assert_eq!(
            alert_events(&drain(&mut rx)),
            vec![AlertState::Alerting, AlertState::Calm, AlertState::Alerting]
        );
    }

    #[test]
    fn test_rearm_skipped_while_alerting() {
        let mut d = dashboard();
        d.start().unwrap();
        let mut rx = d.subscribe();

        // Raise just before the re-arm tick at t=45 so it lands mid-alert.
        d.advance(secs(40));
        drain(&mut rx);
        d.trigger_alert();
        d.advance(secs(6));
        assert_eq!(alert_events(&drain(&mut rx)), vec![AlertState::Alerting]);
        d.advance(secs(6));
        assert_eq!(d.alert_state(), AlertState::Calm);
    }

    #[test]
    fn test_two_submissions_and_replies() {
        let mut d = dashboard();
        let mut rx = d.subscribe();

        d.submit("hello").unwrap();
        d.submit("status report").unwrap();
        assert!(d.is_typing());
        assert_eq!(d.history().len(), 2);
        assert_eq!(d.history()[0].text, "hello");
        assert_eq!(d.history()[1].text, "status report");
        assert!(d.history().iter().all(|m| m.sender == Sender::User));

        d.advance(secs(2));
        assert!(!d.is_typing());
        let history = d.history();
        assert_eq!(history.len(), 4);
        assert!(history[2..].iter().all(|m| m.sender == Sender::Assistant));
        let replies: Vec<&str> = history[2..].iter().map(|m| m.text.as_str()).collect();
        assert!(replies.contains(&responder::REPLY_RULES[1].1));
        assert!(replies.contains(&responder::REPLY_RULES[4].1));

        let typing: Vec<bool> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                DashboardEvent::Typing(t) => Some(t.active),
                _ => None,
            })
            .collect();
        assert_eq!(typing, vec![true, false]);
    }

    #[test]
    fn test_reply_not_before_min_delay() {
        let mut d = dashboard();
        d.submit("thanks").unwrap();
        d.advance(Duration::from_millis(1299));
        assert_eq!(d.history().len(), 1);
        d.advance(Duration::from_millis(701));
        assert_eq!(d.history().len(), 2);
    }

    #[test]
    fn test_empty_submit_rejected() {
        let mut d = dashboard();
        assert_eq!(d.submit("  ").unwrap_err(), ChatError::EmptyMessage);
        assert!(!d.is_typing());
        assert!(d.history().is_empty());
    }

    #[test]
    fn test_teardown_stops_telemetry_only() {
        let mut d = dashboard();
        d.start().unwrap();
        let mut rx = d.subscribe();

        d.advance(secs(3));
        assert!(d.snapshot().telemetry_running);
        assert!(d.teardown());
        assert!(!d.snapshot().telemetry_running);
        assert!(!d.teardown());

        d.advance(secs(10));
        let events = drain(&mut rx);
        let telemetry = events
            .iter()
            .filter(|e| matches!(e, DashboardEvent::Telemetry(_)))
            .count();
        assert_eq!(telemetry, 1);
        assert_eq!(alert_events(&events), vec![AlertState::Alerting]);
    }

    #[test]
    fn test_zero_rearm_start_arms_nothing() {
        let config = Config {
            alert_rearm_secs: 0,
            ..Config::default()
        };
        let mut d = Dashboard::with_rng(config, StdRng::seed_from_u64(1));

        assert_eq!(d.start(), Err(ScheduleError::ZeroPeriod));
        assert_eq!(d.pending_tasks(), 0);
        assert!(!d.snapshot().telemetry_running);

        // A retry fails the same way instead of stacking timers.
        assert_eq!(d.start(), Err(ScheduleError::ZeroPeriod));
        assert_eq!(d.pending_tasks(), 0);
        assert_eq!(d.advance(secs(60)), 0);
        assert_eq!(d.alert_state(), AlertState::Calm);
    }

    #[test]
    fn test_zero_telemetry_interval_start_arms_nothing() {
        let config = Config {
            telemetry_interval_ms: 0,
            ..Config::default()
        };
        let mut d = Dashboard::with_rng(config, StdRng::seed_from_u64(1));

        assert_eq!(d.start(), Err(ScheduleError::ZeroPeriod));
        assert_eq!(d.pending_tasks(), 0);
    }

    #[test]
    fn test_start_twice_arms_once() {
        let mut d = dashboard();
        d.start().unwrap();
        d.start().unwrap();
        // Telemetry, initial alert and re-arm.
        assert_eq!(d.pending_tasks(), 3);
    }

    #[test]
    fn test_snapshot() {
        let mut d = dashboard();
        d.start().unwrap();
        d.set_input_focus(true);
        d.submit("hi").unwrap();
        d.advance(secs(1));

        let snap = d.snapshot();
        assert_eq!(snap.alert, AlertState::Calm);
        assert!(snap.typing);
        assert!(snap.input_focused);
        assert_eq!(snap.message_count, 1);
        assert_eq!(snap.elapsed_ms, 1000);
    }
}

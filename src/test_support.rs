//! Shared test doubles for unit tests.

use crate::channel::{
    domain::HandlerOutcome,
    error::HandlerFailure,
    ports::{MessageHandler, Sleeper},
};
use crate::message::domain::Message;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Local, Utc};
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Handler replaying a script of outcomes, then repeating a fallback.
pub struct ScriptedHandler {
    name: String,
    script: Mutex<VecDeque<HandlerOutcome>>,
    fallback: HandlerOutcome,
    attempts: AtomicUsize,
    accepted: Mutex<Vec<Message>>,
    active: AtomicBool,
}

impl ScriptedHandler {
    pub fn scripted(name: &str, script: Vec<HandlerOutcome>, fallback: HandlerOutcome) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            script: Mutex::new(script.into()),
            fallback,
            attempts: AtomicUsize::new(0),
            accepted: Mutex::new(Vec::new()),
            active: AtomicBool::new(true),
        })
    }

    pub fn accepting(name: &str) -> Arc<Self> {
        Self::scripted(name, Vec::new(), HandlerOutcome::Accepted)
    }

    pub fn rejecting(name: &str) -> Arc<Self> {
        Self::scripted(name, Vec::new(), HandlerOutcome::rejected("at capacity"))
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Self::scripted(
            name,
            Vec::new(),
            HandlerOutcome::Failed(HandlerFailure::message(format!("{name} exploded"))),
        )
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn accepted(&self) -> Vec<Message> {
        self.accepted.lock().expect("accepted lock").clone()
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessageHandler for ScriptedHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, message: &Message) -> HandlerOutcome {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        if outcome.is_accepted() {
            self.accepted
                .lock()
                .expect("accepted lock")
                .push(message.clone());
        }
        outcome
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Sleeper that records requested pauses without waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().expect("pauses lock").clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.pauses.lock().expect("pauses lock").push(duration);
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(start),
        })
    }

    pub fn advance(&self, by: ChronoDuration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

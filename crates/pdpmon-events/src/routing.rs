//! Event bus routing helpers.

use crate::payloads::{DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::{Receiver, Sender};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

struct ReplayRing {
    events: VecDeque<EventEnvelope>,
    next_id: EventId,
}

/// Shared event bus built on top of `tokio::broadcast`.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<EventEnvelope>,
    replay: Arc<Mutex<ReplayRing>>,
    replay_capacity: usize,
}

impl EventBus {
    /// Construct a bus with a custom replay capacity.
    ///
    /// The broadcast channel uses the same capacity as the replay ring so a
    /// lagging subscriber and a late subscriber lose the same events. A zero
    /// capacity is raised to one.
    #[must_use]
    pub fn with_capacity(replay_capacity: usize) -> Self {
        let replay_capacity = replay_capacity.max(1);
        let (sender, _) = broadcast::channel(replay_capacity);
        Self {
            sender,
            replay: Arc::new(Mutex::new(ReplayRing {
                events: VecDeque::with_capacity(replay_capacity),
                next_id: 1,
            })),
            replay_capacity,
        }
    }

    /// Construct a bus with the default replay capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REPLAY_CAPACITY)
    }

    /// Publish a new event to all subscribers and return its identifier.
    ///
    /// Publishing never blocks and succeeds even when nobody is subscribed.
    pub fn publish(&self, event: Event) -> EventId {
        let mut replay = self.lock_replay();
        let id = replay.next_id;
        replay.next_id = replay.next_id.saturating_add(1);

        let envelope = EventEnvelope {
            id,
            timestamp: Utc::now(),
            event,
        };
        if replay.events.len() == self.replay_capacity {
            let _ = replay.events.pop_front();
        }
        replay.events.push_back(envelope.clone());
        let _ = self.sender.send(envelope);
        id
    }

    /// Subscribe to the bus, replaying buffered events newer than `since`.
    ///
    /// With `None` only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, since: Option<EventId>) -> EventSubscriber {
        let replay = self.lock_replay();
        let backlog = since.map_or_else(VecDeque::new, |since| {
            replay
                .events
                .iter()
                .filter(|env| env.id > since)
                .cloned()
                .collect()
        });
        let receiver = self.sender.subscribe();
        drop(replay);
        EventSubscriber { backlog, receiver }
    }

    /// Last event id observed in the replay buffer.
    #[must_use]
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock_replay().events.back().map(|env| env.id)
    }

    /// Collect a backlog of events emitted after the specified id.
    #[must_use]
    pub fn backlog_since(&self, id: EventId) -> Vec<EventEnvelope> {
        self.lock_replay()
            .events
            .iter()
            .filter(|env| env.id > id)
            .cloned()
            .collect()
    }

    fn lock_replay(&self) -> MutexGuard<'_, ReplayRing> {
        self.replay
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscriber handle yielding events from the replay backlog first, then from
/// the live broadcast channel.
pub struct EventSubscriber {
    backlog: VecDeque<EventEnvelope>,
    receiver: Receiver<EventEnvelope>,
}

impl EventSubscriber {
    /// Take the next pending event without waiting.
    ///
    /// Returns `None` when nothing is pending or the bus has been dropped.
    /// Events overwritten while this subscriber lagged are skipped.
    pub fn try_next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain every pending event without waiting.
    pub fn drain(&mut self) -> Vec<EventEnvelope> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Wait for the next event, respecting the replay backlog first.
    pub async fn next(&mut self) -> Option<EventEnvelope> {
        if let Some(event) = self.backlog.pop_front() {
            return Some(event);
        }
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Convert the subscriber into a stream, dropping lag notifications.
    pub fn into_stream(self) -> impl Stream<Item = EventEnvelope> {
        tokio_stream::iter(self.backlog)
            .chain(BroadcastStream::new(self.receiver).filter_map(Result::ok))
    }
}

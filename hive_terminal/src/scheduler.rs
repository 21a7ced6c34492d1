//! Deferred delivery of assistant replies.
//!
//! Every reply waits out its display delay before it reaches the log. Due
//! times never decrease along the queue, so delivery order equals emission
//! order. Each reply holds a child of the session token; cancelling the
//! session token drops everything still pending.

use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::message::Message;

/// Handle of a scheduled reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReplyId(pub u64);

/// A reply waiting for its due time.
#[derive(Debug, Clone)]
pub struct ScheduledReply {
    pub id: ReplyId,
    pub due_at: DateTime<Utc>,
    pub message: Message,
    token: CancellationToken,
}

impl ScheduledReply {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// FIFO queue of pending replies.
#[derive(Debug)]
pub struct Scheduler {
    session: CancellationToken,
    queue: VecDeque<ScheduledReply>,
    next_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            session: CancellationToken::new(),
            queue: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Queue a reply due `delay` after `now`, but never before the last
    /// pending reply.
    pub fn schedule(&mut self, message: Message, delay: Duration, now: DateTime<Utc>) -> ReplyId {
        // Oversized delays saturate instead of overflowing the clock.
        let mut due_at = now
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if let Some(last) = self.queue.back() {
            due_at = due_at.max(last.due_at);
        }

        let id = ReplyId(self.next_id);
        self.next_id += 1;

        self.queue.push_back(ScheduledReply {
            id,
            due_at,
            message,
            token: self.session.child_token(),
        });
        id
    }

    /// Remove and return every reply due at or before `now`.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Message> {
        let mut due = Vec::new();
        while let Some(front) = self.queue.front() {
            if !front.is_cancelled() && front.due_at > now {
                break;
            }
            if let Some(reply) = self.queue.pop_front() {
                if reply.is_cancelled() {
                    debug!(id = reply.id.0, "dropping cancelled reply");
                } else {
                    due.push(reply.message);
                }
            }
        }
        due
    }

    /// Remove and return every live reply regardless of due time.
    pub fn drain(&mut self) -> Vec<Message> {
        self.queue
            .drain(..)
            .filter(|reply| !reply.is_cancelled())
            .map(|reply| reply.message)
            .collect()
    }

    /// Due time of the earliest live reply.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.queue
            .iter()
            .find(|reply| !reply.is_cancelled())
            .map(|reply| reply.due_at)
    }

    /// Cancel one reply. Returns false if it is no longer pending.
    pub fn cancel(&mut self, id: ReplyId) -> bool {
        match self.queue.iter().find(|reply| reply.id == id) {
            Some(reply) if !reply.is_cancelled() => {
                reply.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Cancel everything pending. Replies scheduled afterwards are unaffected.
    pub fn cancel_all(&mut self) {
        let dropped = self.pending();
        self.session.cancel();
        self.session = CancellationToken::new();
        self.queue.clear();
        if dropped > 0 {
            debug!(dropped, "cancelled pending replies");
        }
    }

    /// Number of live pending replies.
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|reply| !reply.is_cancelled()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

//! Upload ordering
//!
//! Every picked file gets a ticket when its resolution starts. Resolutions
//! finish in any order; the queue decides when a finished upload is handed
//! to the gallery.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sequence number reserved when an upload is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Order in which resolved uploads join the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadOrder {
    /// As soon as each file finishes resolving
    #[default]
    Completion,
    /// In the order the files were requested
    Request,
}

/// Reorder buffer for in-flight uploads
#[derive(Debug, Clone)]
pub struct UploadQueue<T> {
    order: UploadOrder,
    next_ticket: u64,
    /// Tickets requested but not yet released, with their result once known.
    /// `Some(None)` marks a failed resolution.
    slots: BTreeMap<Ticket, Option<Option<T>>>,
}

impl<T> UploadQueue<T> {
    pub fn new(order: UploadOrder) -> Self {
        Self {
            order,
            next_ticket: 0,
            slots: BTreeMap::new(),
        }
    }

    /// Reserve a ticket for a new upload
    pub fn reserve(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.slots.insert(ticket, None);
        ticket
    }

    /// Record a successful resolution and return the values ready to add
    pub fn complete(&mut self, ticket: Ticket, value: T) -> Vec<T> {
        self.finish(ticket, Some(value))
    }

    /// Record a failed resolution; it still frees its slot
    pub fn fail(&mut self, ticket: Ticket) -> Vec<T> {
        self.finish(ticket, None)
    }

    /// Number of uploads requested but not yet released
    pub fn pending(&self) -> usize {
        self.slots.len()
    }

    fn finish(&mut self, ticket: Ticket, value: Option<T>) -> Vec<T> {
        // Unknown tickets were already released
        let Some(slot) = self.slots.get_mut(&ticket) else {
            return Vec::new();
        };

        match self.order {
            UploadOrder::Completion => {
                self.slots.remove(&ticket);
                value.into_iter().collect()
            }
            UploadOrder::Request => {
                *slot = Some(value);
                self.drain_ready()
            }
        }
    }

    /// Release the finished prefix of the queue
    fn drain_ready(&mut self) -> Vec<T> {
        let mut ready = Vec::new();
        while let Some(entry) = self.slots.first_entry() {
            if entry.get().is_none() {
                break;
            }
            if let Some(value) = entry.remove().flatten() {
                ready.push(value);
            }
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_order_releases_immediately() {
        let mut queue = UploadQueue::new(UploadOrder::Completion);
        let first = queue.reserve();
        let second = queue.reserve();

        assert_eq!(queue.complete(second, "two"), vec!["two"]);
        assert_eq!(queue.complete(first, "one"), vec!["one"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_request_order_waits_for_earlier_tickets() {
        let mut queue = UploadQueue::new(UploadOrder::Request);
        let first = queue.reserve();
        let second = queue.reserve();

        assert!(queue.complete(second, "two").is_empty());
        assert_eq!(queue.pending(), 2);
        assert_eq!(queue.complete(first, "one"), vec!["one", "two"]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_failure_does_not_block_later_uploads() {
        let mut queue = UploadQueue::new(UploadOrder::Request);
        let first = queue.reserve();
        let second = queue.reserve();
        let third = queue.reserve();

        assert!(queue.complete(third, 3).is_empty());
        assert!(queue.complete(second, 2).is_empty());
        assert_eq!(queue.fail(first), vec![2, 3]);
    }

    #[test]
    fn test_failure_in_completion_order_adds_nothing() {
        let mut queue: UploadQueue<u8> = UploadQueue::new(UploadOrder::Completion);
        let ticket = queue.reserve();
        assert!(queue.fail(ticket).is_empty());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut queue = UploadQueue::new(UploadOrder::Completion);
        let ticket = queue.reserve();
        assert_eq!(queue.complete(ticket, 1), vec![1]);
        assert!(queue.complete(ticket, 1).is_empty());
    }

    #[test]
    fn test_order_parses_from_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            order: UploadOrder,
        }
        let parsed: Wrapper = toml::from_str("order = \"request\"").unwrap();
        assert_eq!(parsed.order, UploadOrder::Request);
    }
}

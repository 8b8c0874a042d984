//! Tracks the newest in-flight request so late responses can be dropped.

/// Monotonic request counter: each `next()` issues a ticket and makes every
/// earlier ticket stale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_ticket_is_stale() {
        let mut seq = RequestSeq::default();
        let first = seq.next();
        let second = seq.next();
        // first response arrives after the second request was issued
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_single_request_is_current() {
        let mut seq = RequestSeq::default();
        let ticket = seq.next();
        assert!(seq.is_current(ticket));
    }
}

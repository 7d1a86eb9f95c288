//! Fetch lifecycle for one remote resource.
//!
//! Every remote collection the app mirrors lives in a [`Slice`]: a
//! tagged status (idle/pending/fulfilled/rejected), the last fulfilled
//! snapshot, and a request sequence counter. Status and error cannot
//! disagree because the error string only exists inside the
//! `Rejected` variant.
//!
//! Responses settle against the ticket handed out by [`Slice::begin`];
//! a response whose ticket is no longer the newest is discarded, so a
//! superseded request (an older search keystroke, a refresh racing a
//! mutation) can never overwrite newer state.

/// Lifecycle status of a slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceStatus {
    /// No request issued yet.
    Idle,
    /// The newest request is in flight.
    Pending,
    /// The newest request succeeded; `data` holds its snapshot.
    Fulfilled,
    /// The newest request failed with a user-displayable message.
    Rejected(String),
}

/// One remote resource and its fetch lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    status: SliceStatus,
    data: Option<T>,
    /// Ticket of the most recently issued request; bumped by `begin`
    /// and `reset` so anything older can no longer settle.
    seq: u64,
}

impl<T> Slice<T> {
    pub fn new() -> Self {
        Self {
            status: SliceStatus::Idle,
            data: None,
            seq: 0,
        }
    }

    /// Issue a new request. Returns the ticket the response must
    /// present to [`fulfill`](Self::fulfill) or [`reject`](Self::reject).
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.status = SliceStatus::Pending;
        self.seq
    }

    /// Apply a successful response. The snapshot replaces `data`
    /// wholesale. Returns `false` (and changes nothing) when the
    /// ticket has been superseded.
    pub fn fulfill(&mut self, ticket: u64, data: T) -> bool {
        if ticket != self.seq {
            return false;
        }
        self.status = SliceStatus::Fulfilled;
        self.data = Some(data);
        true
    }

    /// Apply a failed response. Previously fulfilled data is left in
    /// place. Returns `false` when the ticket has been superseded.
    pub fn reject(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        if ticket != self.seq {
            return false;
        }
        self.status = SliceStatus::Rejected(message.into());
        true
    }

    /// Return to `Idle` with no data and invalidate anything in flight.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.status = SliceStatus::Idle;
        self.data = None;
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutable access to the fulfilled snapshot, for realtime updates
    /// layered on top of a fetched baseline.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// The user-displayable error, present exactly when rejected.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SliceStatus::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.status, SliceStatus::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, SliceStatus::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self.status, SliceStatus::Fulfilled)
    }

    /// Settled means the newest request finished, either way.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            SliceStatus::Fulfilled | SliceStatus::Rejected(_)
        )
    }
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_idle_pending_fulfilled() {
        let mut slice = Slice::<Vec<&str>>::new();
        assert!(slice.is_idle());
        assert_eq!(slice.data(), None);

        let ticket = slice.begin();
        assert!(slice.is_pending());

        assert!(slice.fulfill(ticket, vec!["rust"]));
        assert!(slice.is_fulfilled());
        assert_eq!(slice.data(), Some(&vec!["rust"]));
        assert_eq!(slice.error(), None);
    }

    #[test]
    fn rejected_has_error_and_fulfilled_has_none() {
        let mut slice = Slice::<()>::new();
        let ticket = slice.begin();
        assert!(slice.reject(ticket, "server unreachable"));
        assert_eq!(slice.error(), Some("server unreachable"));
        assert!(slice.is_settled());

        let ticket = slice.begin();
        assert_eq!(slice.error(), None, "pending clears the error");
        assert!(slice.fulfill(ticket, ()));
        assert_eq!(slice.error(), None);
    }

    #[test]
    fn stale_response_is_discarded() {
        // Two category searches: "a" issued first, then "ab". The
        // newer one resolves first; the older response arrives late
        // and must not overwrite it.
        let mut slice = Slice::<Vec<&str>>::new();
        let ticket_a = slice.begin();
        let ticket_ab = slice.begin();

        assert!(slice.fulfill(ticket_ab, vec!["abstract algebra"]));
        assert!(!slice.fulfill(ticket_a, vec!["art", "abstract algebra"]));

        assert_eq!(slice.data(), Some(&vec!["abstract algebra"]));
        assert!(slice.is_fulfilled());
    }

    #[test]
    fn stale_failure_cannot_mask_newer_success() {
        let mut slice = Slice::<u32>::new();
        let old = slice.begin();
        let new = slice.begin();

        assert!(slice.fulfill(new, 7));
        assert!(!slice.reject(old, "timed out"));

        assert!(slice.is_fulfilled());
        assert_eq!(slice.error(), None);
        assert_eq!(slice.data(), Some(&7));
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut slice = Slice::<u32>::new();
        let ticket = slice.begin();
        slice.fulfill(ticket, 1);

        let ticket = slice.begin();
        assert!(slice.reject(ticket, "nope"));
        assert_eq!(slice.data(), Some(&1), "data untouched by failure");
        assert_eq!(slice.error(), Some("nope"));
    }

    #[test]
    fn reset_invalidates_in_flight_requests() {
        let mut slice = Slice::<u32>::new();
        let ticket = slice.begin();
        slice.reset();

        assert!(!slice.fulfill(ticket, 3));
        assert!(slice.is_idle());
        assert_eq!(slice.data(), None);
    }
}

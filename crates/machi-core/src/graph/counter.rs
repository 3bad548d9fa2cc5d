/// Monotonic ordinal source for points and paths
///
/// Owned by a [`Graph`](super::Graph) rather than living in a static, so
/// independent graphs (and tests) never observe each other's numbering.
/// Points and paths draw from the same sequence.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Take the next ordinal
    ///
    /// Wraps past `u64::MAX`, so any 2^64 consecutive ordinals are distinct
    /// whatever the starting value.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Peek at the value the next call to `next_id` returns
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

//! Generation tags that let a screen ignore responses it no longer wants.
//!
//! Every fetch takes a [`Ticket`] from the screen's gate. Starting another fetch
//! moves the gate on, and any response carrying an older ticket is dropped
//! instead of overwriting newer state.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGate {
    generation: u64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut gate = RequestGate::new();
        let first = gate.begin();
        assert!(gate.is_current(first));

        let second = gate.begin();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let mut gate = RequestGate::new();
        let mut applied = Vec::new();

        let slow = gate.begin();
        let fast = gate.begin();
        for (ticket, rows) in [(fast, "fresh"), (slow, "stale")] {
            let rows = async { rows }.await;
            if gate.is_current(ticket) {
                applied.push(rows);
            }
        }
        assert_eq!(applied, vec!["fresh"]);
    }
}

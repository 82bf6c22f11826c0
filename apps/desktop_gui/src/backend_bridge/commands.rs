//! Backend commands queued from UI to backend worker.

use shared::domain::Policy;

/// Identifies one dispatched request so its completion can be matched to the
/// request the controller is still waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    pub fn next_ticket(&mut self) -> RequestTicket {
        self.last += 1;
        RequestTicket(self.last)
    }
}

#[derive(Debug)]
pub enum BackendCommand {
    GeneratePolicy {
        ticket: RequestTicket,
        prompt: String,
    },
    ExplainPolicy {
        ticket: RequestTicket,
        policy: Policy,
    },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GeneratePolicy { .. } => "generate_policy",
            BackendCommand::ExplainPolicy { .. } => "explain_policy",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}

//! Order lifecycle: tracking tokens, the status state machine, budget
//! estimation and the confirmation handoff between submission and landing.

pub mod budget;
pub mod status;
pub mod tickets;
pub mod token;

pub use budget::{FALLBACK_BASE_PRICE, estimate_budget};
pub use tickets::{ConfirmationTickets, Ticket};
pub use token::{MAX_TOKEN_ATTEMPTS, TOKEN_LENGTH, generate_token, is_well_formed};

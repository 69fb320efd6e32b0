pub mod classification;
pub mod ticket;

pub use classification::{ClassificationResult, Intent};
pub use ticket::{Ticket, TicketStatus};

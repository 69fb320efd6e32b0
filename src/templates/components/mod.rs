use crate::domain::{Ticket, TicketStatus};
use maud::{html, Markup};

pub fn status_badge(status: TicketStatus) -> Markup {
    let class = match status {
        TicketStatus::Open => "badge badge-open",
        TicketStatus::Resolved => "badge badge-resolved",
    };
    html! {
        span class=(class) { (status) }
    }
}

/// POST form that resolves one ticket; plain text once resolved.
pub fn resolve_button(ticket: &Ticket) -> Markup {
    html! {
        @if ticket.is_open() {
            form method="post" action=(format!("/resolve/{}", ticket.id)) {
                button type="submit" { "Resolve" }
            }
        } @else {
            span { "Done" }
        }
    }
}

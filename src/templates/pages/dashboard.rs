use crate::domain::Ticket;
use crate::templates::{desktop_layout, resolve_button, status_badge};
use maud::{html, Markup};

pub struct DashboardVm {
    pub tickets: Vec<Ticket>,
}

impl DashboardVm {
    pub fn open_count(&self) -> usize {
        self.tickets.iter().filter(|t| t.is_open()).count()
    }

    pub fn resolved_count(&self) -> usize {
        self.tickets.len() - self.open_count()
    }
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Dashboard",
        html! {
            main class="container" {
                h1 { "Tickets" }

                div class="stats" {
                    span { "Open: " strong { (vm.open_count()) } }
                    span { "Resolved: " strong { (vm.resolved_count()) } }
                }

                @if vm.tickets.is_empty() {
                    p { "No tickets yet." }
                } @else {
                    table {
                        thead {
                            tr {
                                th { "ID" }
                                th { "Category" }
                                th { "Description" }
                                th { "Status" }
                                th { "Created" }
                                th {}
                            }
                        }
                        tbody {
                            @for ticket in &vm.tickets {
                                tr {
                                    td { (ticket.id) }
                                    td { (ticket.category) }
                                    td { (ticket.description) }
                                    td { (status_badge(ticket.status)) }
                                    td {
                                        @if let Some(created) = ticket.created_at {
                                            (created.format("%Y-%m-%d %H:%M"))
                                        }
                                    }
                                    td { (resolve_button(ticket)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

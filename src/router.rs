use crate::app::App;
use crate::db::tickets::{get_ticket, list_tickets, resolve_ticket};
use crate::errors::{ResultResp, ServerError};
use crate::ingress;
use crate::responses::{html_response, json_error_response, json_response, redirect, text_response};
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => text_response(format!(
            "Server Running (Model: {})",
            app.classifier.model_name()
        )),

        // Upload endpoints always answer with the JSON envelope.
        ("POST", "/upload_text") => ingress::upload_text(req, app).or_else(json_failure),
        ("POST", "/upload_audio") => ingress::upload_audio(req, app).or_else(json_failure),

        ("GET", "/dashboard") => {
            let tickets = app.db.with_conn(|conn| list_tickets(conn))?;
            html_response(dashboard_page(&DashboardVm { tickets }))
        }
        ("GET", "/tickets") => {
            let tickets = app.db.with_conn(|conn| list_tickets(conn))?;
            json_response(200, &tickets)
        }
        ("POST", p) if p.starts_with("/resolve/") => {
            let id = parse_ticket_id(p)?;
            app.db.with_conn(|conn| match get_ticket(conn, id)? {
                Some(ticket) if ticket.is_open() => {
                    resolve_ticket(conn, id)?;
                    tracing::info!(ticket_id = id, "ticket resolved");
                    Ok(())
                }
                Some(_) => Ok(()),
                None => {
                    tracing::warn!(ticket_id = id, "resolve requested for unknown ticket");
                    Ok(())
                }
            })?;
            redirect("/dashboard")
        }

        (_, "/" | "/upload_text" | "/upload_audio" | "/dashboard" | "/tickets") => {
            Err(ServerError::MethodNotAllowed)
        }
        (_, p) if p.starts_with("/resolve/") => Err(ServerError::MethodNotAllowed),
        _ => Err(ServerError::NotFound),
    }
}

fn json_failure(err: ServerError) -> ResultResp {
    if err.status_code() >= 500 {
        tracing::error!(error = %err, "upload failed");
    } else {
        tracing::warn!(error = %err, "upload rejected");
    }
    Ok(json_error_response(&err))
}

fn parse_ticket_id(path: &str) -> Result<i64, ServerError> {
    path.strip_prefix("/resolve/")
        .and_then(|id| id.parse().ok())
        .ok_or(ServerError::NotFound)
}

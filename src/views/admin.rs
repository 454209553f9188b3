use crate::models::appointment::parse_iso_utc;
use crate::models::{Appointment, RequestStatus, Snackbar};
use crate::services::admin::{AdminDialogs, CancelDialog, EditSession};
use crate::services::appointments_store::AppointmentsState;
use crate::services::booking::REASON_MAX_CHARS;

use super::{disabled, escape, layout, post_button, week_range};

const MISSING: &str = "—";

fn format_with(iso: &str, pattern: &str) -> String {
    parse_iso_utc(iso)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| iso.to_string())
}

/// `Mon, Jun 16`
pub fn format_date(iso: &str) -> String {
    format_with(iso, "%a, %b %-d")
}

/// `14:30`
pub fn format_time(iso: &str) -> String {
    format_with(iso, "%H:%M")
}

/// `Jun 10, 09:15`
pub fn format_timestamp(iso: &str) -> String {
    format_with(iso, "%b %-d, %H:%M")
}

fn alert(message: &str) -> String {
    format!(r#"<div class="alert" role="alert">{}</div>"#, escape(message))
}

fn render_row(appointment: &Appointment) -> String {
    let id = appointment.id;
    format!(
        r#"<tr data-id="{id}"><td>{date}</td><td>{time}</td><td>{name}</td><td><a href="mailto:{email}">{email}</a></td><td>{phone}</td><td>{reason}</td><td>{created}</td><td>{cancel}{edit}</td></tr>"#,
        date = escape(&format_date(&appointment.start_time)),
        time = escape(&format_time(&appointment.start_time)),
        name = escape(&appointment.name),
        email = escape(&appointment.email),
        phone = escape(appointment.phone.as_deref().unwrap_or(MISSING)),
        reason = escape(appointment.display_reason().unwrap_or(MISSING)),
        created = escape(&format_timestamp(&appointment.created_at)),
        cancel = post_button(
            &format!("/admin/appointments/{id}/cancel-request"),
            None,
            "btn",
            true,
            "Cancel"
        ),
        edit = post_button(
            &format!("/admin/appointments/{id}/edit"),
            None,
            "btn",
            true,
            "Edit"
        ),
    )
}

fn render_cancel_dialog(dialog: &CancelDialog) -> String {
    let appointment = &dialog.appointment;
    let busy = dialog.status.is_loading();
    let error = match (dialog.status, dialog.error.as_deref()) {
        (RequestStatus::Error, Some(message)) => alert(message),
        _ => String::new(),
    };
    format!(
        r#"<div class="dialog" role="dialog" aria-modal="true">
<h2>Cancel Appointment</h2>
<p class="muted">Are you sure you want to cancel the appointment with <strong>{name}</strong> on {date} at {time}?</p>
{error}
<div class="dialog__actions">{keep}{confirm}</div>
</div>"#,
        name = escape(&appointment.name),
        date = escape(&format_date(&appointment.start_time)),
        time = escape(&format_time(&appointment.start_time)),
        error = error,
        keep = post_button("/admin/appointments/dialog/close", None, "btn", !busy, "Keep"),
        confirm = post_button(
            &format!("/admin/appointments/{}/cancel", appointment.id),
            None,
            "btn btn--danger",
            !busy,
            if busy { "Cancelling…" } else { "Cancel Appointment" },
        ),
    )
}

/// Navigation button inside the edit form. It posts the whole form to its
/// own route, so the reason typed so far travels with it.
fn edit_nav_button(
    route: &str,
    name: &str,
    value: &str,
    class: &str,
    enabled: bool,
    label: &str,
) -> String {
    format!(
        r#"<button type="submit" formaction="{route}" name="{name}" value="{value}" class="{class}"{dis}>{label}</button>"#,
        route = route,
        name = name,
        value = escape(value),
        class = class,
        dis = disabled(enabled),
        label = label,
    )
}

fn render_edit_dialog(session: &EditSession) -> String {
    let busy = session.status.is_loading();
    let mut html = format!(
        r#"<div class="dialog" role="dialog" aria-modal="true">
<h2>Edit Appointment</h2>
<p class="muted">Reschedule <strong>{}</strong>.</p>
<form method="post" action="/admin/appointments/edit/submit">
<div class="toolbar"><span>Select Week</span><div>"#,
        escape(&session.appointment.name)
    );
    html.push_str(&edit_nav_button(
        "/admin/appointments/edit/week",
        "direction",
        "previous",
        "btn",
        session.can_go_previous(),
        "‹",
    ));
    html.push_str(&edit_nav_button(
        "/admin/appointments/edit/week",
        "direction",
        "next",
        "btn",
        session.can_go_next(),
        "›",
    ));
    html.push_str("</div></div>");

    if busy {
        html.push_str(r#"<p class="muted">Loading available slots…</p>"#);
    }
    if let Some(message) = session.error.as_deref() {
        html.push_str(&alert(message));
    }

    // Failed submits keep the loaded week, so the form stays usable.
    if !session.days.is_empty() && !busy {
        html.push_str(r#"<div class="day-strip">"#);
        for (index, day) in session.days.iter().enumerate() {
            let class = if index == session.selected_day {
                "btn btn--active"
            } else {
                "btn"
            };
            let label = format!(
                "<span>{}</span><span>{}</span>",
                escape(&day.short_day_label()),
                escape(&day.date_label)
            );
            html.push_str(&edit_nav_button(
                "/admin/appointments/edit/day",
                "day",
                &index.to_string(),
                class,
                true,
                &label,
            ));
        }
        html.push_str("</div>");

        let mut options = String::from(r#"<option value="" disabled"#);
        if session.selected_slot.is_none() {
            options.push_str(" selected");
        }
        options.push_str(">Select a time</option>");
        for slot in session.selected_day().map(|d| d.slots.as_slice()).unwrap_or_default() {
            let selected = if session.selected_slot.as_deref() == Some(slot.iso.as_str()) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape(&slot.iso),
                escape(&slot.label)
            ));
        }

        html.push_str(&format!(
            r#"<label class="form-field">Available Times<select name="slot">{options}</select></label>
<label class="form-field"><span>Reason / Notes <span class="muted">{count}/{max}</span></span><textarea name="reason" rows="2" maxlength="{max}">{reason}</textarea></label>
<div class="dialog__actions"><button type="submit" class="btn btn--primary">Save</button></div>"#,
            options = options,
            count = session.reason.chars().count(),
            max = REASON_MAX_CHARS,
            reason = escape(&session.reason),
        ));
    }
    html.push_str("</form>");

    html.push_str(&format!(
        r#"<div class="dialog__actions">{}</div></div>"#,
        post_button("/admin/appointments/dialog/close", None, "btn", !busy, "Close")
    ));
    html
}

pub fn render(
    state: &AppointmentsState,
    dialogs: &AdminDialogs,
    snackbar: Option<&Snackbar>,
) -> String {
    let subtitle = week_range(state.week_start.as_deref(), state.week_end.as_deref())
        .map(|range| format!("Week of {range}"))
        .unwrap_or_else(|| "Review scheduled meetings".to_string());

    let mut body = format!(
        r#"<div class="toolbar"><div><h1>Appointments</h1><p class="subtitle">{}</p></div><div>{}{}</div></div>"#,
        escape(&subtitle),
        post_button(
            "/admin/appointments/previous",
            None,
            "btn",
            state.can_go_previous(),
            "Previous"
        ),
        post_button(
            "/admin/appointments/next",
            None,
            "btn",
            state.can_go_next(),
            "Next"
        ),
    );

    match state.status {
        RequestStatus::Loading if state.items.is_empty() => {
            body.push_str(r#"<p class="muted">Loading appointments…</p>"#)
        }
        RequestStatus::Error => body.push_str(&alert(
            state.error.as_deref().unwrap_or("Unable to load appointments."),
        )),
        RequestStatus::Ready if state.items.is_empty() => body.push_str(
            r#"<p class="muted" role="status">No appointments scheduled for this period.</p>"#,
        ),
        _ => {}
    }

    if !state.items.is_empty() {
        body.push_str(
            "<table><thead><tr><th>Date</th><th>Time</th><th>Name</th><th>Email</th><th>Phone</th><th>Reason</th><th>Created</th><th>Actions</th></tr></thead><tbody>",
        );
        for appointment in &state.items {
            body.push_str(&render_row(appointment));
        }
        body.push_str("</tbody></table>");
    }

    if let Some(dialog) = &dialogs.cancel {
        body.push_str(&render_cancel_dialog(dialog));
    }
    if let Some(session) = &dialogs.edit {
        body.push_str(&render_edit_dialog(session));
    }

    layout("Appointments", snackbar, &body)
}

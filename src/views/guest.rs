use crate::models::availability::{format_day_labels, format_time_label};
use crate::models::{DayAvailability, RequestStatus, Snackbar};
use crate::services::availability_store::AvailabilityState;
use crate::services::booking::REASON_MAX_CHARS;
use crate::services::guest::GuestSelection;

use super::{escape, layout, post_button, week_range};

/// `Monday, Jun 16 · 9:00 AM`, or the raw value if it does not parse.
fn display_slot(iso: &str) -> String {
    let day = iso.get(0..10).and_then(format_day_labels);
    match (day, format_time_label(iso)) {
        (Some((day, date)), Some(time)) => format!("{day}, {date} · {time}"),
        _ => iso.to_string(),
    }
}

fn render_calendar(state: &AvailabilityState, selection: &GuestSelection) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="toolbar"><h2>Select a Date</h2><div>"#);
    html.push_str(&post_button(
        "/guest/schedule/previous",
        None,
        "btn",
        state.can_go_previous(),
        "‹",
    ));
    html.push_str(&post_button(
        "/guest/schedule/next",
        None,
        "btn",
        state.can_go_next(),
        "›",
    ));
    html.push_str("</div></div>");

    let range = week_range(state.week_start.as_deref(), state.week_end.as_deref());
    html.push_str(&format!(
        r#"<p class="muted">Available slots (Mon–Fri){}</p>"#,
        range.map(|r| format!(", {r}")).unwrap_or_default()
    ));

    match state.status {
        RequestStatus::Loading => html.push_str(r#"<p class="muted">Loading available dates…</p>"#),
        RequestStatus::Error => html.push_str(&format!(
            r#"<div class="alert" role="alert">{}</div>"#,
            escape(state.error.as_deref().unwrap_or("Unable to load available slots."))
        )),
        RequestStatus::Ready if state.days.is_empty() => {
            html.push_str(r#"<p class="muted">No available dates this week.</p>"#)
        }
        _ => {}
    }
    if state.status != RequestStatus::Ready {
        return html;
    }

    html.push_str(r#"<div class="day-strip">"#);
    for (index, day) in state.days.iter().enumerate() {
        let class = if index == selection.selected_day {
            "btn btn--active"
        } else {
            "btn"
        };
        let label = format!(
            "<span>{}</span><span>{}</span>",
            escape(&day.short_day_label()),
            escape(&day.date_label)
        );
        html.push_str(&post_button(
            "/guest/schedule/day",
            Some(("day", &index.to_string())),
            class,
            true,
            &label,
        ));
    }
    html.push_str("</div>");
    html
}

fn render_slots(
    status: RequestStatus,
    selected_day: Option<&DayAvailability>,
    selection: &GuestSelection,
) -> String {
    let mut html = String::new();
    let (title, subtitle) = match selected_day {
        Some(day) => (escape(&day.day_label), escape(&day.date_label)),
        None => ("Select a date".to_string(), "No date chosen".to_string()),
    };
    html.push_str(&format!(
        r#"<h2>{title}</h2><p class="muted">{subtitle}</p>"#
    ));

    if status != RequestStatus::Ready {
        return html;
    }
    let Some(day) = selected_day else {
        return html;
    };
    if day.slots.is_empty() {
        html.push_str(r#"<div class="alert" role="alert">No slots are available for this date.</div>"#);
        return html;
    }

    html.push_str(r#"<div class="slot-grid">"#);
    for slot in &day.slots {
        let class = if selection.selected_slot.as_deref() == Some(slot.iso.as_str()) {
            "btn btn--active"
        } else {
            "btn"
        };
        html.push_str(&post_button(
            "/guest/schedule/slot",
            Some(("slot", &slot.iso)),
            class,
            true,
            &escape(&slot.label),
        ));
    }
    html.push_str("</div>");
    html
}

fn render_booking_form(slot: &str, selection: &GuestSelection) -> String {
    let form = &selection.form;
    let error = selection
        .form_error
        .as_deref()
        .map(|e| format!(r#"<div class="alert" role="alert">{}</div>"#, escape(e)))
        .unwrap_or_default();
    format!(
        r#"<div class="dialog" role="dialog" aria-modal="true">
<h2>Confirm Appointment</h2>
<p class="muted">{when}</p>
<form method="post" action="/guest/schedule/book">
<label class="form-field">Name *<input name="name" value="{name}" required></label>
<label class="form-field">Email *<input name="email" type="email" value="{email}" required></label>
<label class="form-field">Phone<input name="phone" value="{phone}"></label>
<label class="form-field"><span>Reason / Notes <span class="muted">{count}/{max}</span></span><textarea name="reason" rows="3" maxlength="{max}">{reason}</textarea></label>
{error}
<div class="dialog__actions"><button type="submit" class="btn btn--primary">Submit</button></div>
</form>
<div class="dialog__actions">{close}</div>
</div>"#,
        when = escape(&display_slot(slot)),
        name = escape(&form.name),
        email = escape(&form.email),
        phone = escape(&form.phone),
        reason = escape(&form.reason),
        count = form.reason.chars().count(),
        max = REASON_MAX_CHARS,
        error = error,
        close = post_button("/guest/schedule/close", None, "btn", true, "Cancel"),
    )
}

pub fn render(
    state: &AvailabilityState,
    selection: &GuestSelection,
    snackbar: Option<&Snackbar>,
) -> String {
    let selected_day = state.days.get(selection.selected_day);
    let mut body = String::from(
        r#"<h1>Book an appointment</h1><p class="subtitle">Pick a weekday and a free time slot.</p>"#,
    );
    body.push_str(&render_calendar(state, selection));
    body.push_str(&render_slots(state.status, selected_day, selection));
    if let (true, Some(slot)) = (selection.form_visible, selection.selected_slot.as_deref()) {
        body.push_str(&render_booking_form(slot, selection));
    }
    layout("Book an appointment", snackbar, &body)
}

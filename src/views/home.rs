use super::layout;

pub fn render() -> String {
    let body = r#"<h1>Welcome to the Appointment Scheduler</h1>
<p class="subtitle">Choose how you want to continue. Manage bookings as an admin or browse slots as a guest.</p>
<div class="role-grid">
<a class="role-card" href="/admin/appointments"><strong>I'm an Admin</strong><p class="muted">Review, cancel and reschedule appointments.</p></a>
<a class="role-card" href="/guest/schedule"><strong>I'm a Guest</strong><p class="muted">Pick a free slot and book it.</p></a>
</div>"#;
    layout("Appointment Scheduler", None, body)
}

pub mod admin;
pub mod guest;
pub mod home;

use chrono::NaiveDate;

use crate::models::Snackbar;

static STYLES: &str = include_str!("../web/styles.css");

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `Jun 16 – Jun 22` from the week bounds of a response.
pub fn week_range(week_start: Option<&str>, week_end: Option<&str>) -> Option<String> {
    let parse = |s: &str| {
        s.get(0..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    };
    let start = parse(week_start?)?;
    let end = parse(week_end?)?;
    Some(format!(
        "{} – {}",
        start.format("%b %-d"),
        end.format("%b %-d")
    ))
}

pub(crate) fn disabled(flag: bool) -> &'static str {
    if flag {
        ""
    } else {
        " disabled"
    }
}

/// A button wrapped in its own POST form, optionally carrying one field.
pub(crate) fn post_button(
    action: &str,
    field: Option<(&str, &str)>,
    class: &str,
    enabled: bool,
    label: &str,
) -> String {
    let hidden = field
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape(name),
                escape(value)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<form method="post" action="{action}" class="inline">{hidden}<button type="submit" class="{class}"{dis}>{label}</button></form>"#,
        action = escape(action),
        class = class,
        dis = disabled(enabled),
        label = label,
    )
}

fn render_snackbar(snackbar: Option<&Snackbar>) -> String {
    match snackbar {
        Some(s) => format!(
            r#"<div class="snackbar snackbar--{variant}" role="status" data-duration="{duration}">{message}</div>
<script>setTimeout(function(){{var s=document.querySelector('.snackbar');if(s){{s.remove();}}}},{duration});</script>"#,
            variant = s.variant.as_str(),
            duration = s.duration_ms,
            message = escape(&s.message),
        ),
        None => String::new(),
    }
}

pub fn layout(title: &str, snackbar: Option<&Snackbar>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{styles}</style>
</head>
<body>
<main class="app-shell">
<nav class="app-nav"><a href="/">Home</a><a href="/guest/schedule">Book</a><a href="/admin/appointments">Admin</a></nav>
<section class="app-shell__content">
{body}
</section>
</main>
{snackbar}
</body>
</html>"#,
        title = escape(title),
        styles = STYLES,
        body = body,
        snackbar = render_snackbar(snackbar),
    )
}

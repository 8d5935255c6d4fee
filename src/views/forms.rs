use std::fmt::Write;

use crate::error::FieldErrors;
use crate::form::FormState;

/// 字段名、标签、是否掩码
type FieldDef = (&'static str, &'static str, bool);

const LOGIN_FIELDS: &[FieldDef] = &[("username", "Username", false), ("password", "Password", true)];

const REGISTER_FIELDS: &[FieldDef] = &[
    ("username", "Username", false),
    ("email", "Email", false),
    ("password", "Password", true),
    ("confirmPassword", "Confirm Password", true),
];

pub fn render_login(form: &FormState, loading: bool) -> String {
    render_form("Login", LOGIN_FIELDS, form, loading)
}

pub fn render_register(form: &FormState, loading: bool) -> String {
    render_form("Register", REGISTER_FIELDS, form, loading)
}

pub fn render_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for message in errors.values() {
        let _ = writeln!(out, "  • {}", message);
    }
    out
}

fn render_form(title: &str, fields: &[FieldDef], form: &FormState, loading: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", title, if loading { " (loading...)" } else { "" });
    for (name, label, masked) in fields {
        let value = form.value(name);
        let shown = if *masked { "*".repeat(value.chars().count()) } else { value.to_string() };
        let marker = if form.has_error(name) { " !" } else { "" };
        let _ = writeln!(out, "  {}: {}{}", label, shown, marker);
    }
    if !form.errors().is_empty() {
        out.push_str(&render_errors(form.errors()));
    }
    out
}

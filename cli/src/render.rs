//! Plain-text rendering of the task and health views.

use std::fmt::Write;

use task_core::{App, HealthCheck, ListView};

pub fn app(app: &App) -> String {
    let mut out = String::new();
    if app.is_loading() {
        out.push_str("Loading tasks...\n");
    }
    if let Some(error) = app.error() {
        let _ = writeln!(out, "! {error}");
    }
    match app.view() {
        ListView::Empty(message) => {
            let _ = writeln!(out, "{message}");
        }
        ListView::Rows(rows) => {
            for row in rows {
                let mark = if row.checked { 'x' } else { ' ' };
                let _ = writeln!(out, "[{mark}] {:>4}  {}", row.id, row.title);
                if let Some(description) = row.description {
                    let _ = writeln!(out, "{:10}{description}", "");
                }
            }
        }
    }
    out
}

pub fn health(health: &HealthCheck) -> String {
    let mut out = String::from("API Status\n");
    if health.is_loading() {
        out.push_str("Checking API connection...\n");
        return out;
    }
    let _ = writeln!(out, "Status: {}", health.status());
    if let Some(error) = health.error() {
        let _ = writeln!(out, "{error}");
    }
    out
}

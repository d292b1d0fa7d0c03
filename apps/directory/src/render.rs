use std::fmt::Write as _;

use client_core::DirectoryView;

pub fn render(view: &DirectoryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Student Management ==");
    if let Some(notification) = &view.notification {
        let _ = writeln!(out, "[ok] {notification}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "-- Add Student --");
    for field in &view.form.fields {
        let _ = writeln!(out, "  {:<10} {}", format!("{}:", field.label), field.value);
    }
    let state = if view.form.disabled { " (disabled)" } else { "" };
    let _ = writeln!(out, "  [{}]{state}", view.form.submit_label);

    let _ = writeln!(out);
    match &view.badge {
        Some(badge) => {
            let _ = writeln!(out, "-- Student Directory ({badge}) --");
        }
        None => {
            let _ = writeln!(out, "-- Student Directory --");
        }
    }
    if let Some(status) = &view.status {
        let _ = writeln!(out, "  {status}");
    }
    if !view.rows.is_empty() {
        let _ = writeln!(
            out,
            "  {:>4}  {:<24} {:<30} {:<20} Actions",
            "ID", "Name", "Email", "Major"
        );
        for row in &view.rows {
            let action = if row.remove_disabled {
                format!("({})", row.remove_label)
            } else {
                format!("[{}]", row.remove_label)
            };
            let _ = writeln!(
                out,
                "  {:>4}  {:<24} {:<30} {:<20} {action}",
                row.id.0, row.full_name, row.email, row.major
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use client_core::{Action, DirectoryState};
    use shared::domain::{Student, StudentId};

    use super::*;

    #[test]
    fn renders_rows_and_badge() {
        let mut state = DirectoryState::default();
        state.apply(Action::LoadSucceeded(vec![Student {
            id: StudentId(1),
            full_name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            major: "Math".into(),
        }]));
        state.apply(Action::DeleteStarted(StudentId(1)));

        let text = render(&DirectoryView::from_state(&state));
        assert!(text.contains("(1 total)"));
        assert!(text.contains("Ann Lee"));
        assert!(text.contains("(Removing...)"));
        assert!(text.contains("[Add student]"));
    }

    #[test]
    fn renders_loading_status() {
        let text = render(&DirectoryView::from_state(&DirectoryState::default()));
        assert!(text.contains("Loading students..."));
        assert!(!text.contains("total"));
    }
}

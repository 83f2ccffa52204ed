use concierge_core::{
    AccountViewModel, Category, LookupAvailability, ReservationRowView, ReservationStatus,
    SignupRole, TabView,
};

/// Renders the view model as terminal lines. Pure: everything shown comes in
/// through the view model, nothing is captured.
pub(crate) fn render(view: &AccountViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.rows.len() + 3);

    let tab_bar = view
        .tabs
        .iter()
        .map(format_tab)
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(tab_bar);

    if view.rows.is_empty() {
        lines.push("  (no reservations)".to_string());
    }
    for row in &view.rows {
        lines.push(format_row(row));
    }

    lines.push(format!(
        "role: {} | address lookup: {}",
        role_label(view.role),
        lookup_label(view.lookup)
    ));
    lines
}

fn format_tab(tab: &TabView) -> String {
    let label = tab_label(tab.category);
    if tab.active {
        format!("[{} ({})]", label, tab.count)
    } else {
        format!(" {} ({}) ", label, tab.count)
    }
}

fn format_row(row: &ReservationRowView) -> String {
    format!(
        "  [{id}] {status:<11} {title} @ {venue} ({date})",
        id = row.id,
        status = status_label(row.status),
        title = row.title,
        venue = row.venue,
        date = row.scheduled_for
    )
}

fn tab_label(category: Category) -> &'static str {
    match category {
        Category::All => "All",
        Category::Status(ReservationStatus::InProgress) => "In progress",
        Category::Status(ReservationStatus::Completed) => "Completed",
    }
}

fn status_label(status: Option<ReservationStatus>) -> &'static str {
    match status {
        Some(ReservationStatus::InProgress) => "IN PROGRESS",
        Some(ReservationStatus::Completed) => "COMPLETED",
        None => "-",
    }
}

fn role_label(role: Option<SignupRole>) -> &'static str {
    match role {
        Some(SignupRole::Customer) => "customer",
        Some(SignupRole::Partner) => "partner",
        None => "(not chosen)",
    }
}

fn lookup_label(lookup: LookupAvailability) -> &'static str {
    match lookup {
        LookupAvailability::NotRequested => "idle",
        LookupAvailability::Loading => "loading",
        LookupAvailability::Ready => "ready",
        LookupAvailability::Failed => "unavailable",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with_rows() -> AccountViewModel {
        AccountViewModel {
            tabs: vec![
                TabView {
                    category: Category::All,
                    count: 2,
                    active: false,
                },
                TabView {
                    category: Category::Status(ReservationStatus::InProgress),
                    count: 1,
                    active: true,
                },
                TabView {
                    category: Category::Status(ReservationStatus::Completed),
                    count: 1,
                    active: false,
                },
            ],
            rows: vec![ReservationRowView {
                id: "r-1041".to_string(),
                title: "Gel manicure".to_string(),
                venue: "Atelier Mo".to_string(),
                scheduled_for: "2025-11-02".to_string(),
                status: Some(ReservationStatus::InProgress),
            }],
            role: None,
            lookup: LookupAvailability::Failed,
            dirty: false,
        }
    }

    #[test]
    fn active_tab_is_bracketed_with_count() {
        let lines = render(&view_with_rows());

        assert!(lines[0].contains("[In progress (1)]"));
        assert!(lines[0].contains(" All (2) "));
    }

    #[test]
    fn rows_show_status_label_and_display_fields() {
        let lines = render(&view_with_rows());

        assert!(lines[1].contains("IN PROGRESS"));
        assert!(lines[1].contains("Gel manicure @ Atelier Mo (2025-11-02)"));
    }

    #[test]
    fn footer_reports_failed_lookup_as_unavailable() {
        let lines = render(&view_with_rows());

        let footer = lines.last().unwrap();
        assert!(footer.contains("address lookup: unavailable"));
        assert!(footer.contains("role: (not chosen)"));
    }

    #[test]
    fn empty_view_renders_placeholder_row() {
        let view = AccountViewModel::default();
        let lines = render(&view);

        assert!(lines.iter().any(|line| line.contains("(no reservations)")));
    }
}

//! Static reservation fixture standing in for the account service.

use concierge_core::{Reservation, ReservationStatus};
use page_logging::{page_error, page_warn};
use serde::Deserialize;

const RESERVATIONS_JSON: &str = r#"[
    {
        "id": "r-1041",
        "status": "in_progress",
        "title": "Gel manicure",
        "venue": "Atelier Mo",
        "scheduled_for": "2025-11-02"
    },
    {
        "id": "r-1037",
        "status": "in_progress",
        "title": "Cut & style",
        "venue": "Studio Han",
        "scheduled_for": "2025-11-05"
    },
    {
        "id": "r-0996",
        "status": "completed",
        "title": "Hair color",
        "venue": "Studio Han",
        "scheduled_for": "2025-10-18"
    },
    {
        "id": "r-0981",
        "status": "completed",
        "title": "Scalp treatment",
        "venue": "Salon Bora",
        "scheduled_for": "2025-10-09"
    },
    {
        "id": "r-0977",
        "status": "cancelled",
        "title": "Perm consultation",
        "venue": "Salon Bora",
        "scheduled_for": "2025-10-01"
    }
]"#;

#[derive(Debug, Clone, Deserialize)]
struct RawReservation {
    id: String,
    #[serde(default)]
    status: Option<String>,
    title: String,
    venue: String,
    scheduled_for: String,
}

pub(crate) fn load_reservations() -> Vec<Reservation> {
    let raw: Vec<RawReservation> = match serde_json::from_str(RESERVATIONS_JSON) {
        Ok(rows) => rows,
        Err(err) => {
            page_error!("Failed to parse reservation fixture: {}", err);
            return Vec::new();
        }
    };
    raw.into_iter().map(into_reservation).collect()
}

fn into_reservation(raw: RawReservation) -> Reservation {
    let status = match raw.status.as_deref() {
        Some("in_progress") => Some(ReservationStatus::InProgress),
        Some("completed") => Some(ReservationStatus::Completed),
        Some(other) => {
            // Tolerated: such rows are listed under All only.
            page_warn!("Reservation {} has unrecognized status {:?}", raw.id, other);
            None
        }
        None => None,
    };
    Reservation {
        id: raw.id,
        status,
        title: raw.title,
        venue: raw.venue,
        scheduled_for: raw.scheduled_for,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_parses_and_maps_statuses() {
        let reservations = load_reservations();

        assert_eq!(reservations.len(), 5);
        let in_progress = reservations
            .iter()
            .filter(|r| r.status == Some(ReservationStatus::InProgress))
            .count();
        let completed = reservations
            .iter()
            .filter(|r| r.status == Some(ReservationStatus::Completed))
            .count();
        assert_eq!(in_progress, 2);
        assert_eq!(completed, 2);
    }

    #[test]
    fn unrecognized_status_maps_to_none() {
        let reservations = load_reservations();
        let cancelled = reservations
            .iter()
            .find(|r| r.id == "r-0977")
            .expect("fixture row");

        assert_eq!(cancelled.status, None);
    }
}

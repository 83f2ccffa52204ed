use crate::{Category, LookupAvailability, ReservationId, ReservationStatus, SignupRole};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountViewModel {
    pub tabs: Vec<TabView>,
    pub rows: Vec<ReservationRowView>,
    pub role: Option<SignupRole>,
    pub lookup: LookupAvailability,
    pub dirty: bool,
}

/// One list tab. `active` is an explicit flag so renderers never have to
/// compare against captured selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabView {
    pub category: Category,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRowView {
    pub id: ReservationId,
    pub title: String,
    pub venue: String,
    pub scheduled_for: String,
    pub status: Option<ReservationStatus>,
}

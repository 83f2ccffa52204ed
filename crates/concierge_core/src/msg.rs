#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User selected a list tab.
    CategorySelected(crate::Category),
    /// Data-source collaborator delivered the reservation collection.
    ReservationsLoaded(Vec<crate::Reservation>),
    /// User picked a role on the signup step.
    RoleSelected(crate::SignupRole),
    /// User opened the address entry, which needs the lookup script.
    AddressLookupRequested,
    /// Loader reported a phase for the lookup script.
    LookupStatusChanged(crate::LookupAvailability),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

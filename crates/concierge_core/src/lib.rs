//! Concierge core: pure account-page state machine and view-model helpers.
mod effect;
mod list;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use list::{derive_view, CategoryCounts, ListDerivation};
pub use msg::Msg;
pub use state::{
    AppState, Category, LookupAvailability, Reservation, ReservationId, ReservationStatus,
    SignupRole,
};
pub use update::update;
pub use view_model::{AccountViewModel, ReservationRowView, TabView};

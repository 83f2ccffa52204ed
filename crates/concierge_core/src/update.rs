use crate::{AppState, Effect, LookupAvailability, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CategorySelected(category) => {
            // Any category can follow any other; only an actual change
            // schedules a re-render. The record collection is untouched.
            if state.selection() != category {
                state.set_selection(category);
            }
            Vec::new()
        }
        Msg::ReservationsLoaded(reservations) => {
            state.set_reservations(reservations);
            Vec::new()
        }
        Msg::RoleSelected(role) => {
            if state.role() != Some(role) {
                state.set_role(role);
            }
            Vec::new()
        }
        Msg::AddressLookupRequested => {
            if state.lookup() == LookupAvailability::Ready {
                Vec::new()
            } else {
                vec![Effect::EnsureLookupScript]
            }
        }
        Msg::LookupStatusChanged(lookup) => {
            // The loader re-emits the current phase on repeat requests;
            // duplicates must not dirty the view.
            if state.lookup() != lookup {
                state.set_lookup(lookup);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

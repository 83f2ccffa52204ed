use crate::list::derive_view;
use crate::view_model::{AccountViewModel, ReservationRowView, TabView};

pub type ReservationId = String;

/// Closed set of reservation states the page knows how to file under a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    InProgress,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 2] =
        [ReservationStatus::InProgress, ReservationStatus::Completed];
}

/// One reservation row. The display fields are opaque to the core; only
/// `status` is ever inspected. A reservation whose source status was missing
/// or unrecognized carries `None` and shows up under `All` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub status: Option<ReservationStatus>,
    pub title: String,
    pub venue: String,
    pub scheduled_for: String,
}

/// The active list tab. Exactly one category is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Status(ReservationStatus),
}

impl Category {
    /// Tab order as the page presents it.
    pub const TABS: [Category; 3] = [
        Category::All,
        Category::Status(ReservationStatus::InProgress),
        Category::Status(ReservationStatus::Completed),
    ];

    pub fn matches(self, status: Option<ReservationStatus>) -> bool {
        match self {
            Category::All => true,
            Category::Status(wanted) => status == Some(wanted),
        }
    }
}

/// Role chosen on the signup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupRole {
    Customer,
    Partner,
}

/// Core-side mirror of the address-lookup script phase. The engine owns the
/// real state; this copy is updated only through messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupAvailability {
    #[default]
    NotRequested,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    reservations: Vec<Reservation>,
    selection: Category,
    role: Option<SignupRole>,
    lookup: LookupAvailability,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AccountViewModel {
        let derived = derive_view(&self.reservations, self.selection);
        let tabs = Category::TABS
            .iter()
            .map(|&category| TabView {
                category,
                count: derived.counts.get(category),
                active: category == self.selection,
            })
            .collect();
        let rows = derived
            .visible
            .into_iter()
            .map(|reservation| ReservationRowView {
                id: reservation.id,
                title: reservation.title,
                venue: reservation.venue,
                scheduled_for: reservation.scheduled_for,
                status: reservation.status,
            })
            .collect();
        AccountViewModel {
            tabs,
            rows,
            role: self.role,
            lookup: self.lookup,
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn selection(&self) -> Category {
        self.selection
    }

    pub fn role(&self) -> Option<SignupRole> {
        self.role
    }

    pub fn lookup(&self) -> LookupAvailability {
        self.lookup
    }

    pub(crate) fn set_selection(&mut self, selection: Category) {
        self.selection = selection;
        self.dirty = true;
    }

    pub(crate) fn set_reservations(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
        self.dirty = true;
    }

    pub(crate) fn set_role(&mut self, role: SignupRole) {
        self.role = Some(role);
        self.dirty = true;
    }

    pub(crate) fn set_lookup(&mut self, lookup: LookupAvailability) {
        self.lookup = lookup;
        self.dirty = true;
    }
}

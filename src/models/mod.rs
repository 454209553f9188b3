pub mod appointment;
pub mod availability;
pub mod snackbar;
pub mod status;

pub use appointment::{
    Appointment, AppointmentsResponse, CreateAppointmentPayload, UpdateAppointmentPayload,
};
pub use availability::{AvailableSlotsResponse, DayAvailability, TimeSlot};
pub use snackbar::{Snackbar, SnackbarVariant};
pub use status::RequestStatus;

pub mod admin;
pub mod api;
pub mod appointments_store;
pub mod availability_store;
pub mod booking;
pub mod clock;
pub mod guest;
pub mod root_store;
pub mod snackbar;
pub mod week;

#[cfg(test)]
pub(crate) mod testing;

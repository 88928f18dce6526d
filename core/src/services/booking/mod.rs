//! Room reservations

mod service;


pub use service::{BookingChanges, BookingService, NewBooking};

//! Airline dataset module
//!
//! The in-memory model of the airline domain: flights with per-date
//! availability, reservations with an append-only payment ledger, and users
//! with stored payment methods.
//!
//! ```text
//! AirlineData
//!   ├─ flights:      flight_number  → Flight { dates: date → FlightDateStatus }
//!   ├─ reservations: reservation_id → Reservation { flights, passengers, payment_history }
//!   └─ users:        user_id        → User { payment_methods, reservations }
//! ```
//!
//! The dataset is owned by whoever drives the tools (a workflow session or the
//! bench environment); tools receive it as `&mut AirlineData`.

pub mod entities;
pub mod value_objects;

pub use entities::{
    Address, AirlineData, Flight, FlightDateStatus, Passenger, Payment, PaymentMethod,
    PersonName, Reservation, ReservedFlight, User, hash_value,
};
pub use value_objects::{
    CabinClass, CabinFigures, FlightType, Insurance, Membership, ReservationStatus,
};

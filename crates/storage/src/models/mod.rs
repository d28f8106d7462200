mod cart;
mod matches;
mod participant;
mod reservation;
mod team;
mod user;

pub use cart::CartLine;
pub use matches::{Match, MatchStatus};
pub use participant::{Participant, PlayerPosition};
pub use reservation::{Reservation, ReservationLine, ReservationStatus};
pub use team::Team;
pub use user::User;

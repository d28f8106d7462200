pub mod carts;
pub mod matches;
pub mod reservations;
pub mod teams;
pub mod users;

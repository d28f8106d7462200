pub mod cart;
pub mod matches;
pub mod participant;
pub mod reservation;
pub mod team;
pub mod user;

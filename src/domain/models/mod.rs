pub mod auth;
pub mod booking;
pub mod hotel;
pub mod page;
pub mod room;
pub mod user;

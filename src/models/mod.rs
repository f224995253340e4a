pub mod account;
pub mod booking;
pub mod guest;
pub mod room;

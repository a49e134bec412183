pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod duration;
pub mod macros;
pub mod treatment;
pub mod uuid_service;

#[cfg(test)]
mod test;

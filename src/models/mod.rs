pub mod admin;
pub mod booking;
pub mod package;
pub mod service;

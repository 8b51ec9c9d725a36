pub mod booking_lifecycle;
pub mod email_service;
pub mod pricing_service;

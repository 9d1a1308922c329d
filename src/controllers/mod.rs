pub mod availability_controller;
pub mod booking_controller;

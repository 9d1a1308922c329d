pub mod availability_dto;
pub mod booking_dto;
pub mod common;
pub mod vehicle_dto;

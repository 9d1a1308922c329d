//! Backend de reservas de vehículos
//!
//! Un cliente pide un vehículo para un rango de fechas y el staff acepta
//! o rechaza la petición. El core es el resolver de disponibilidad
//! (ventanas allow/deny con aritmética de intervalos semiabiertos) y la
//! máquina de estados del ciclo de vida de la reserva.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

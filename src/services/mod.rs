//! Servicios del sistema
//!
//! Este módulo contiene la lógica de negocio: resolución de
//! disponibilidad, coordinación del ciclo de vida de reservas y despacho
//! de notificaciones.

pub mod availability_service;
pub mod booking_service;
pub mod notification_service;

//! Backend de gestión de talleres mecánicos
//!
//! Clientes, vehículos, empleados, servicios y órdenes de trabajo por taller,
//! con las reglas de integridad que protegen el historial de órdenes.

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

// src/handlers/mod.rs

pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod rates;
pub mod social;
pub mod stats;
pub mod talents;

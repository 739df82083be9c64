// src/services/mod.rs

pub mod auth;
pub mod crm_service;
pub mod rate_card_service;
pub mod revenue_service;
pub mod social_service;
pub mod stats_service;
pub mod storage_service;
pub mod talent_service;

pub mod auth;
pub mod catalog;
pub mod client;
pub mod revenue;
pub mod social;
pub mod stats;
pub mod talent;
pub mod taxonomy;

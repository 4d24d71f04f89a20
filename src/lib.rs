pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod geo;
pub mod report;
pub mod router;
pub mod routes;
pub mod service;
pub mod storage;

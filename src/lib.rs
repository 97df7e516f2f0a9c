extern crate diesel;
extern crate tokio;

pub mod config;
pub mod db;
pub mod error;
pub mod loader;
pub mod logger;
pub mod models;
pub mod pricing;
pub mod services;
pub mod web;

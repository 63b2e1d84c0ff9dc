// src/lib.rs

//! spacenews: terminal reader for the Spaceflight News API

pub mod api;
pub mod error;
pub mod models;
pub mod pages;
pub mod render;
pub mod routes;
pub mod services;
pub mod utils;

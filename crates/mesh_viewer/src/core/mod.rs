//! Core viewer modules

pub mod config;

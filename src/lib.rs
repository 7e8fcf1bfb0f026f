//! CareMyCar Core - Client library for the CareMyCar service
//!
//! This crate implements the non-visual core of the CareMyCar maintenance
//! and parts-ordering client: transport, repositories, and per-screen
//! state containers backed by the remote REST API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

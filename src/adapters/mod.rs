//! Adapters - implementations of the ports.
//!
//! `http` is the shared transport, `rest` the production repositories,
//! `token` the session store, and `mock` the in-memory fakes used by
//! tests and headless development.

pub mod http;
pub mod mock;
pub mod rest;
pub mod token;

//! Backend service adapters: roster, emotion diary and exam records over HTTP,
//! plus an in-process mock used when no backend is configured.

pub mod client;
pub mod mapper;
pub mod mock;

pub use client::HttpBackend;
pub use mock::MockBackend;

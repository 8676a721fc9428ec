//! Library crate for usrapi-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client for the users backend (`api`)
//! - Application state, page controller and event loop (`app`)
//! - Command-line configuration (`config`)
//! - Error and result types (`error`)
//! - User record and draft types (`model`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usrapi-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};

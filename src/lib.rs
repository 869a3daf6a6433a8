//! # Vendui - Vendor Management TUI
//!
//! A terminal client for a vendor-management REST backend, built with Rust
//! and Ratatui.
//!
//! ## Architecture Overview
//!
//! The application is a single action loop ([`app::App`]) fanning events and
//! actions out to screen [`components`]. Views never talk to each other;
//! they communicate by emitting [`action::Action`] values back into the
//! loop.
//!
//! The data path is deliberately simple: the list view holds the fetched
//! collection and re-derives its visible rows through the pure [`query`]
//! pipeline (filter, sort, paginate) on every draw. Forms validate through
//! [`validate`] before anything reaches the [`api`] client.
//!
//! ## Modules
//!
//! - [`vendor`] - The vendor record, its draft and field enums
//! - [`query`] - Filter/sort/paginate pipeline and list view state
//! - [`validate`] - Form validation
//! - [`export`] - CSV export of the filtered view
//! - [`api`] - REST client for the backend
//! - [`components`] - UI components
//! - [`config`] - Configuration and keybindings

#![deny(warnings)]

pub mod action;
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod export;
pub mod mode;
pub mod query;
pub mod tui;
pub mod utils;
pub mod validate;
pub mod vendor;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

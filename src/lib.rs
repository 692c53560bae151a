//! Core library for the `nyanlook` CLI.
//!
//! This crate provides the building blocks used by the binary: the location
//! API client and token store, CLI argument and config handling, the timeline
//! scrubber that windows and replays a device's location history, and the
//! terminal dashboard that renders it. The primary user-facing interface is
//! the `nyanlook` command-line application; library APIs may evolve as the
//! CLI grows.
pub mod api;
pub mod args;
pub mod auth;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod system;
pub mod timeline;
pub mod ui;

mod app;

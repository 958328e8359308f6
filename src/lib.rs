//! finboard: a terminal personal-finance dashboard.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod modules;
pub mod nav;
pub mod report;
pub mod ui;

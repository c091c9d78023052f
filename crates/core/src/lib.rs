#![deny(rust_2018_idioms)]

pub mod broadcast_log;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod host;
pub mod plugin;
pub mod target;

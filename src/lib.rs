//! Build orchestration for the reload native application and the
//! `version` header stamping tool.

pub mod args;
pub mod cmd;
pub mod context;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod platform;
pub mod result;
pub mod stamp;
pub mod tasks;
pub mod tpl;
pub mod ui;
pub mod utils;

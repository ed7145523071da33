#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for datacollector
//!
//! This library hosts everything a third-party provider needs to plug into the fixed
//! collect → assess → report → run workflow without writing any CLI parsing, file layout,
//! or archiving logic of its own.
//!
//! # Module Organization
//!
//! - [`cli`]: Command grammar and the recursive resolver that binds CLI tokens to it
//! - [`model`]: Environment, assessment unit, recommendation, and report documents
//! - [`pipeline`]: Stage coordinator, content masking, and archive writing
//! - [`plugin`]: Provider and provider registry interfaces
//! - [`commands`]: CLI entry point, host abstraction, and configuration
//! - [`generic`]: A ready-to-use sample provider for plain configuration files

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod cli;
pub mod commands;
pub mod generic;
pub mod model;
pub mod pipeline;
pub mod plugin;

pub use crate::commands::{Config, Host, LogLevel, run};

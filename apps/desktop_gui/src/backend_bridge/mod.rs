//! UI-to-backend bridge: the command vocabulary and the worker runtime.

pub mod commands;
pub mod runtime;

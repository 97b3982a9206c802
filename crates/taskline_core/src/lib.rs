//! Command parsing and task model for a line-driven task tracker.
//!
//! A driver feeds lines into [`session::Session`], which parses each one into
//! a [`command::Command`], runs it against the [`task_list::TaskList`] and
//! rewrites the task file after every change.

pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod session;
pub mod storage;
pub mod task_list;

//! Terminal front end for the japan-info content API.

pub mod cli;
pub mod commands;
pub mod output;

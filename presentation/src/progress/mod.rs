//! Progress reporting for folder runs

pub mod reporter;

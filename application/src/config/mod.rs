//! Application configuration
//!
//! [`DispatchParams`] carries the dispatch knobs into the use cases; it is
//! built by the binary from the loaded configuration file.

mod dispatch_params;

pub use dispatch_params::DispatchParams;

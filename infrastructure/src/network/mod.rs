//! Network reachability

mod probe;

pub use probe::HttpConnectivityProbe;

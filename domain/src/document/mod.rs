//! Source documents: kind classification and output naming

pub mod kind;
pub mod naming;

pub use kind::{DocumentKind, ELIGIBLE_EXTENSIONS};
pub use naming::{RECOGNIZED_PREFIXES, derive_output_name};

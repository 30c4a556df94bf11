//! Provider spend ranking ("Top Prestadores")

pub mod providers;

pub use providers::*;

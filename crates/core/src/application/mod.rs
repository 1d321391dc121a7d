// Application Layer - argument derivation pipeline

pub mod arguments;

pub use arguments::{apply_arguments, default_modificators, ArgumentsContext, Modificator};

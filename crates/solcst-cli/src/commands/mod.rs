pub mod check;
pub mod source_loader;
pub mod tokens;
pub mod tree;

pub mod panel;
pub mod tree;

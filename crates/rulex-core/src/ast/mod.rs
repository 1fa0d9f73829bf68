//! Operator definitions shared by the parser, compiler and runtime

pub mod operator;

pub use operator::Operator;

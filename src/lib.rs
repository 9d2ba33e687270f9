// Library entry exposing parser modules.
pub mod argument;
pub mod cli;
pub mod error;
pub mod instructions;
pub mod parser;
pub mod scanner;
pub mod stats;
pub mod xml;

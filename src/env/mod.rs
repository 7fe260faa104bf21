pub mod base;
pub mod hfo;

pub mod eval;
pub mod logger;
pub mod spaces;
pub mod utils;

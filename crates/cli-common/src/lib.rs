//! Error reporting shared by command line tools.

pub mod errors;

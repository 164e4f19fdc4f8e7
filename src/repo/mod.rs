//! Version-control inspection of the project directory.

pub mod remote;

pub use remote::detect_git_info;

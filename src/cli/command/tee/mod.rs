mod tee_args;

pub use tee_args::TeeArgs;

pub mod flush_error_policy;
pub mod tee_writer;

pub use flush_error_policy::FlushErrorPolicy;
pub use tee_writer::TeeWriter;

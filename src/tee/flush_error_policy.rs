use arbitrary::Arbitrary;
use clap::ValueEnum;
use std::io;
use strum::Display;
use strum::EnumString;

/// What a [`TeeWriter`](super::TeeWriter) does when flushing one of its sinks fails.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, ValueEnum, Arbitrary,
)]
#[strum(serialize_all = "kebab-case")]
pub enum FlushErrorPolicy {
    /// Discard flush errors so `flush` always reports success.
    #[default]
    Ignore,
    /// Report the first flush error. Both sinks are still flushed.
    Propagate,
}

impl FlushErrorPolicy {
    /// Combine the outcomes of flushing the console and the file, in that order.
    ///
    /// # Errors
    ///
    /// Under [`FlushErrorPolicy::Propagate`], returns the console error if there was one,
    /// otherwise the file error.
    pub fn resolve(self, console: io::Result<()>, file: io::Result<()>) -> io::Result<()> {
        match self {
            FlushErrorPolicy::Ignore => Ok(()),
            FlushErrorPolicy::Propagate => console.and(file),
        }
    }
}

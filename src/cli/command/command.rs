use crate::cli::command::tee::TeeArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

/// Console tee commands
#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Copy stdin to stdout and append it to a log file
    Tee(TeeArgs),
}

impl Command {
    /// Invoke the command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn invoke(self) -> eyre::Result<()> {
        match self {
            Command::Tee(args) => args.invoke(),
        }
    }
}

impl ToArgs for Command {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            Command::Tee(tee_args) => {
                args.push("tee".into());
                args.extend(tee_args.to_args());
            }
        }
        args
    }
}

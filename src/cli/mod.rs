pub mod global_args;
pub mod json_log_behaviour;
pub mod to_args;
mod command;

pub use command::Command;
pub use command::tee::TeeArgs;

use crate::cli::global_args::GlobalArgs;
use arbitrary::Arbitrary;
use clap::Parser;
use std::ffi::OsString;
use to_args::Invocable;
use to_args::ToArgs;
use tracing::debug;

#[derive(Parser, Arbitrary, PartialEq, Debug)]
#[clap(version)]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Initialize tracing from the global arguments, then invoke the command.
    ///
    /// # Errors
    ///
    /// Returns an error if tracing initialization fails or the command execution fails.
    pub fn invoke(self) -> eyre::Result<()> {
        crate::logging::init_tracing(
            self.global_args.log_level(),
            &self.global_args.json_log_behaviour(),
        )?;
        debug!(invocation = %self.display_invocation(), "Parsed command line");
        self.command.invoke()
    }

    #[must_use]
    pub fn display_invocation(&self) -> String {
        let exe = self.path_to_exe();
        let mut args = self.args();
        args.insert(0, exe.file_name().unwrap_or(exe.as_os_str()).to_owned());
        args.iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ToArgs for Cli {
    fn to_args(&self) -> Vec<OsString> {
        // Globals go last so a bare `--json` never swallows a positional.
        let mut args = self.command.to_args();
        args.extend(self.global_args.to_args());
        args
    }
}

impl Invocable for Cli {
    fn path_to_exe(&self) -> std::path::PathBuf {
        std::env::current_exe().unwrap_or_else(|_| env!("CARGO_PKG_NAME").into())
    }

    fn args(&self) -> Vec<OsString> {
        self.to_args()
    }
}

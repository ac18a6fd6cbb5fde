use crate::cli::to_args::ToArgs;
use crate::tee::FlushErrorPolicy;
use crate::tee::TeeWriter;
use arbitrary::Arbitrary;
use clap::Args;
use eyre::WrapErr;
use humansize::DECIMAL;
use humansize::format_size;
use std::ffi::OsString;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Arbitrary, PartialEq, Debug, Default)]
pub struct TeeArgs {
    /// Log file that receives a copy of everything written to stdout; appended to if it exists
    pub log_file_path: PathBuf,
    /// What to do when flushing stdout or the log file fails
    #[arg(long, value_enum, default_value_t)]
    pub on_flush_error: FlushErrorPolicy,
}

impl TeeArgs {
    /// Copy stdin to stdout and the log file until EOF.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened, if reading stdin or writing
    /// either sink fails, or if a flush fails under [`FlushErrorPolicy::Propagate`].
    pub fn invoke(self) -> eyre::Result<()> {
        info!(
            path = %self.log_file_path.display(),
            on_flush_error = %self.on_flush_error,
            "Teeing stdin to stdout"
        );

        let copied = self.run(&mut std::io::stdin().lock(), std::io::stdout())?;

        info!(
            "Teed {} into {}",
            format_size(copied, DECIMAL),
            self.log_file_path.display()
        );
        Ok(())
    }

    /// Copy `input` into `console` and the log file until EOF, then close the tee.
    ///
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened, if reading `input` or writing
    /// either sink fails, or if a flush fails under [`FlushErrorPolicy::Propagate`].
    pub fn run<C: Write>(&self, input: &mut impl Read, console: C) -> eyre::Result<u64> {
        let mut tee = TeeWriter::with_console(console, &self.log_file_path)
            .wrap_err_with(|| {
                format!(
                    "Failed to open log file for appending: {}",
                    self.log_file_path.display()
                )
            })?
            .with_flush_error_policy(self.on_flush_error);

        let copied = std::io::copy(input, &mut tee).wrap_err("Failed to tee input")?;
        tee.close().wrap_err("Failed to close tee")?;
        Ok(copied)
    }
}

impl ToArgs for TeeArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![self.log_file_path.clone().into()];
        if self.on_flush_error != FlushErrorPolicy::default() {
            args.push("--on-flush-error".into());
            args.push(self.on_flush_error.to_string().into());
        }
        args
    }
}

use std::ffi::OsString;
use std::path::PathBuf;

/// Render a parsed CLI value back into the arguments that produce it.
///
/// Parsing the output of `to_args` must yield a value equal to `self`.
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}

/// A complete invocation of this program.
pub trait Invocable {
    fn path_to_exe(&self) -> PathBuf;
    fn args(&self) -> Vec<OsString>;
}

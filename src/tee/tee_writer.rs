use super::FlushErrorPolicy;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Stdout;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Mirrors everything written to it into a console sink and an append-mode log file.
///
/// The console sink is whatever the caller hands in (`Stdout` by default, but any
/// [`Write`] works, including `&mut Vec<u8>`). The log file is owned by the writer
/// and closed when the writer is dropped or [`closed`](TeeWriter::close).
///
/// Writes are not buffered, transformed or split on lines. Each call to `write`
/// reaches each sink exactly once, an empty buffer included. If the console accepts
/// the bytes and the file does not, the error is returned and the console keeps
/// what it received.
#[derive(Debug)]
pub struct TeeWriter<C: Write = Stdout> {
    console: C,
    file: File,
    path: PathBuf,
    flush_error_policy: FlushErrorPolicy,
}

impl TeeWriter<Stdout> {
    /// Open `path` for appending and mirror it with the process's standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::with_console(io::stdout(), path)
    }
}

impl<C: Write> TeeWriter<C> {
    /// Open `path` for appending, creating it if needed, and mirror it with `console`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be opened for appending, e.g. when its
    /// parent directory does not exist or permission is denied.
    pub fn with_console(console: C, path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "Opened tee log file");
        Ok(Self {
            console,
            file,
            path,
            flush_error_policy: FlushErrorPolicy::default(),
        })
    }

    /// Choose what [`flush`](Write::flush) and [`close`](TeeWriter::close) do with flush errors.
    #[must_use]
    pub fn with_flush_error_policy(mut self, flush_error_policy: FlushErrorPolicy) -> Self {
        self.flush_error_policy = flush_error_policy;
        self
    }

    /// The log file this writer appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn flush_error_policy(&self) -> FlushErrorPolicy {
        self.flush_error_policy
    }

    /// Flush both sinks under the configured policy, then release the log file.
    ///
    /// # Errors
    ///
    /// Returns a flush error when the policy is [`FlushErrorPolicy::Propagate`].
    pub fn close(mut self) -> io::Result<()> {
        self.flush()?;
        debug!(path = %self.path.display(), "Closed tee log file");
        Ok(())
    }
}

impl<C: Write> Write for TeeWriter<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Console first, then file.
        if buf.is_empty() {
            // `write_all` makes no call for an empty buffer.
            let console = self.console.write(buf)?;
            let file = self.file.write(buf)?;
            return Ok(console.min(file));
        }
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let console = self.console.flush();
        let file = self.file.flush();
        self.flush_error_policy.resolve(console, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Console sink that records every call made against it.
    #[derive(Debug, Default)]
    struct RecordingSink {
        writes: Vec<Vec<u8>>,
        flushes: usize,
        fail_writes: bool,
        fail_flushes: bool,
    }

    impl Write for RecordingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"));
            }
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            if self.fail_flushes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"));
            }
            Ok(())
        }
    }

    #[test]
    fn hello_world_reaches_both_sinks() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");
        let mut console = Vec::new();

        let mut tee = TeeWriter::with_console(&mut console, &path)?;
        tee.write_all(b"hello\n")?;
        tee.write_all(b"world\n")?;
        tee.close()?;

        assert_eq!(std::fs::read_to_string(&path)?, "hello\nworld\n");
        assert_eq!(String::from_utf8(console)?, "hello\nworld\n");
        Ok(())
    }

    #[test]
    fn one_console_write_per_message_in_order() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");
        let mut sink = RecordingSink::default();
        let messages: [&[u8]; 3] = [b"first", b"\x00\xffbinary", b"third\r\n"];

        let mut tee = TeeWriter::with_console(&mut sink, &path)?;
        for message in messages {
            tee.write_all(message)?;
        }
        drop(tee);

        assert_eq!(sink.writes, messages.map(<[u8]>::to_vec));
        assert_eq!(std::fs::read(&path)?, messages.concat());
        Ok(())
    }

    #[test]
    fn empty_write_still_reaches_each_sink() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");
        let mut sink = RecordingSink::default();

        let mut tee = TeeWriter::with_console(&mut sink, &path)?;
        assert_eq!(tee.write(b"")?, 0);
        assert_eq!(tee.write(b"x")?, 1);
        drop(tee);

        assert_eq!(sink.writes, vec![Vec::new(), b"x".to_vec()]);
        assert_eq!(std::fs::read(&path)?, b"x");
        Ok(())
    }

    #[test]
    fn reopening_appends_instead_of_truncating() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");

        let mut first = TeeWriter::with_console(Vec::new(), &path)?;
        first.write_all(b"a\n")?;
        first.close()?;

        let mut second = TeeWriter::with_console(Vec::new(), &path)?;
        second.write_all(b"b\n")?;
        second.close()?;

        assert_eq!(std::fs::read_to_string(&path)?, "a\nb\n");
        Ok(())
    }

    #[test]
    fn unopenable_path_fails_at_construction() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing").join("run.log");

        let err = TeeWriter::with_console(Vec::new(), &path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn default_policy_swallows_flush_errors() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut sink = RecordingSink {
            fail_flushes: true,
            ..RecordingSink::default()
        };

        let mut tee = TeeWriter::with_console(&mut sink, dir.path().join("run.log"))?;
        assert_eq!(tee.flush_error_policy(), FlushErrorPolicy::Ignore);
        tee.flush()?;
        tee.flush()?;
        tee.close()?;

        assert_eq!(sink.flushes, 3);
        Ok(())
    }

    #[test]
    fn propagate_policy_surfaces_flush_errors() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut sink = RecordingSink {
            fail_flushes: true,
            ..RecordingSink::default()
        };

        let mut tee = TeeWriter::with_console(&mut sink, dir.path().join("run.log"))?
            .with_flush_error_policy(FlushErrorPolicy::Propagate);
        let err = tee.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(tee.close().is_err());
        Ok(())
    }

    #[test]
    fn console_write_failure_leaves_file_untouched() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");
        let mut sink = RecordingSink {
            fail_writes: true,
            ..RecordingSink::default()
        };

        let mut tee = TeeWriter::with_console(&mut sink, &path)?;
        let err = tee.write_all(b"lost\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        drop(tee);

        assert!(std::fs::read(&path)?.is_empty());
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn file_write_failure_keeps_console_copy() -> eyre::Result<()> {
        // Every write to /dev/full fails with ENOSPC.
        let full = Path::new("/dev/full");
        if !full.exists() {
            return Ok(());
        }
        let mut console = Vec::new();

        let mut tee = TeeWriter::with_console(&mut console, full)?;
        assert!(tee.write_all(b"partial\n").is_err());
        drop(tee);

        assert_eq!(console, b"partial\n");
        Ok(())
    }

    #[test]
    fn open_mirrors_process_stdout() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("stdout.log");

        let mut tee = TeeWriter::open(&path)?;
        tee.write_all(b"")?;
        tee.close()?;

        assert!(path.exists());
        assert!(std::fs::read(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn accessors_report_construction_inputs() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("run.log");

        let tee = TeeWriter::with_console(Vec::new(), &path)?
            .with_flush_error_policy(FlushErrorPolicy::Propagate);
        assert_eq!(tee.path(), path);
        assert_eq!(tee.flush_error_policy(), FlushErrorPolicy::Propagate);
        Ok(())
    }
}

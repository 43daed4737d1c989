use exn::ResultExt;
use medialib_import::Importer;
use medialib_media::Library;
use std::io::{BufRead, Write};
use tracing::instrument;

use crate::command::{Command, Outcome};
use crate::error::{ErrorKind, Result};
use crate::results::ResultSet;

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State shared by every command of one interactive run: the library, the
/// importer feeding it, and the results of the last listing.
#[derive(Debug, Default)]
pub struct Session {
    pub library: Library,
    pub importer: Importer,
    results: Option<ResultSet>,
}
impl Session {
    pub fn new() -> Self {
        Self::with_library(Library::new(), Importer::new())
    }

    pub fn with_library(library: Library, importer: Importer) -> Self {
        Self { library, importer, results: None }
    }

    /// The result set later commands address by position, if any command has
    /// produced one yet.
    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Runs `command`. New results are shown and replace the current set;
    /// every other outcome leaves the current set alone.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        match command.execute(self, out)? {
            Outcome::Done => Ok(Flow::Continue),
            Outcome::Results(results) => {
                if results.is_empty() {
                    tracing::debug!("no matching files");
                }
                results.show(&self.library, out)?;
                self.results = Some(results);
                Ok(Flow::Continue)
            },
            Outcome::Quit => Ok(Flow::Quit),
        }
    }

    /// Like [`execute`](Self::execute), but reports command errors to the
    /// operator and carries on. Only fatal errors are returned.
    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow> {
        let result = self.execute(command, out);
        recover(result, out)
    }

    /// Parses and handles one line of input. Blank lines do nothing.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let result = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => Err(err),
        };
        recover(result, out)
    }

    /// Prompts for and handles lines until `quit` or the end of `input`.
    #[instrument(skip_all)]
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write, prompt: &str) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{prompt}").or_raise(|| ErrorKind::Output)?;
            out.flush().or_raise(|| ErrorKind::Output)?;
            line.clear();
            if input.read_line(&mut line).or_raise(|| ErrorKind::Input)? == 0 {
                tracing::debug!("end of input");
                writeln!(out).or_raise(|| ErrorKind::Output)?;
                return Ok(());
            }
            if self.handle_line(&line, out)? == Flow::Quit {
                tracing::debug!("quit requested");
                return Ok(());
            }
        }
    }
}

fn recover(result: Result<Flow>, out: &mut impl Write) -> Result<Flow> {
    match result {
        Err(err) if !err.is_fatal() => {
            tracing::debug!(error = ?err, retryable = err.is_retryable(), "command failed");
            writeln!(out, "> {}", *err).or_raise(|| ErrorKind::Output)?;
            Ok(Flow::Continue)
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use std::io::Cursor;

    const LIBRARY: &str = r#"[
        {"fullpath": "/photos/moonrise.jpg", "type": "image", "metadata": {"creator": "Ansel Adams", "resolution": "4000x3000"}},
        {"fullpath": "/docs/walden.pdf", "type": "document", "metadata": {"creator": "Thoreau"}},
        {"fullpath": "/music/so-what.mp3", "type": "audio", "metadata": {"creator": "Miles Davis", "runtime": "9:22"}}
    ]"#;

    fn script(session: &mut Session, lines: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(lines.to_string()), &mut out, "> ").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let out = script(&mut Session::new(), "");
        assert_eq!(out, "> \n");
    }

    #[test]
    fn test_quit_stops_reading() {
        let out = script(&mut Session::new(), "quit\nhelp\n");
        assert_eq!(out, "> ");
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let out = script(&mut Session::new(), "\n   \nquit\n");
        assert_eq!(out, "> > > ");
    }

    #[rstest]
    #[case("frobnicate\n", "> unknown command 'frobnicate', type 'help' for usage\n")]
    #[case("load\n", "> invalid parameters for 'load', type 'help' for usage\n")]
    #[case("add 0 year 1854\n", "> no previous results to work with, try 'list' first\n")]
    fn test_errors_are_reported_and_session_continues(#[case] line: &str, #[case] message: &str) {
        let out = script(&mut Session::new(), &format!("{line}quit\n"));
        assert_eq!(out, format!("> {message}> "));
    }

    #[test]
    fn test_list_replaces_results_and_failures_keep_them() {
        let mut session = Session::new();
        session.library.extend(Importer::new().read_path(write_library().path().join("library.json")).unwrap().files);
        let out = script(&mut session, "list thoreau\nlist nobody\nadd 0 year 1854\n");
        assert_eq!(
            out,
            "> 0: /docs/walden.pdf [document] creator: Thoreau\n\
             > > > index 0 is out of range for 0 results\n\
             > \n"
        );
        assert_eq!(session.results(), Some(&ResultSet::default()));
    }

    #[test]
    fn test_modifications_show_in_later_listings() {
        let dir = write_library();
        let path = dir.path().join("library.json");
        let mut session = Session::new();
        let out = script(
            &mut session,
            &format!("load {}\nlist 9:22\nadd 0 year 1959\nlist 1959\nquit\n", path.display()),
        );
        assert_eq!(
            out,
            "> 3 files loaded successfully.\n\
             0: moonrise.jpg\n\
             1: walden.pdf\n\
             2: so-what.mp3\n\
             > 0: /music/so-what.mp3 [audio] creator: Miles Davis, runtime: 9:22\n\
             > 0: /music/so-what.mp3 [audio] creator: Miles Davis, runtime: 9:22, year: 1959\n\
             > 0: /music/so-what.mp3 [audio] creator: Miles Davis, runtime: 9:22, year: 1959\n\
             > "
        );
    }

    #[test]
    fn test_load_keeps_previous_results() {
        let dir = write_library();
        let path = dir.path().join("library.json");
        let mut session = Session::new();
        script(&mut session, &format!("load {}\nlist walden.pdf thoreau\n", path.display()));
        let before = session.results().cloned();
        script(&mut session, &format!("load {}\n", path.display()));
        assert_eq!(session.library.count(), 6);
        assert_eq!(session.results().cloned(), before);
    }

    #[test]
    fn test_handle_returns_fatal_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = Session::new().handle(Command::Help, &mut Broken).unwrap_err();
        assert_eq!(*err, ErrorKind::Output);
    }

    fn write_library() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("library.json"), LIBRARY).unwrap();
        dir
    }
}

//! Shell commands.
//!
//! A line of input becomes a [`Command`] through [`Command::parse`], which
//! checks the shape of the arguments. [`Command::execute`] consumes the
//! command, so each one runs at most once, and reports what the session
//! should do next as an [`Outcome`].

use exn::{OptionExt, ResultExt};
use medialib_import::save;
use medialib_media::{FileId, MetadataEntry};
use std::io::Write;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::results::ResultSet;
use crate::session::Session;

macro_rules! say {
    ($out:expr, $($arg:tt)*) => {
        writeln!($out, $($arg)*).or_raise(|| ErrorKind::Output)
    };
}

pub const HELP: &str = "\
\thelp                              - this text
\tload <filename> ...               - load file into the collection
\tlist <term> ...                   - list all the files that have the term specified
\tlist                              - list all the files in the collection
\tadd <number> <key> <value> ...    - add some metadata to a file
\tset <number> <key> <value> ...    - this is really a del followed by an add
\tdel <number> <key> ...            - removes a metadata item from a file
\tsave-search <filename>            - saves the last list results to a file
\tsave <filename>                   - saves the whole collection to a file
\tquit                              - exit the program (without prompts)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Import every file, in order, straight into the library.
    Load { files: Vec<String> },
    /// Files matching any term, or every file when there are none.
    List { terms: Vec<String> },
    /// `index` refers to the previous result set.
    Add { index: usize, entries: Vec<MetadataEntry> },
    Set { index: usize, entries: Vec<MetadataEntry> },
    Del { index: usize, keywords: Vec<String> },
    SaveSearch { filename: String },
    Save { filename: String },
}

/// What the session should do once a command has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing further; any previous result set stays current.
    Done,
    /// Show these results and make them the current result set.
    Results(ResultSet),
    /// End the session successfully, without offering to save.
    Quit,
}

impl Command {
    /// Parses one line of input. Returns `None` for a blank line.
    ///
    /// Words are separated by whitespace; the first selects the command
    /// (case-insensitively) and the rest are its parameters.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let params: Vec<String> = words.map(str::to_string).collect();
        let command = match name.to_lowercase().as_str() {
            "help" => Self::Help,
            "quit" => Self::Quit,
            "load" => Self::Load { files: params },
            "list" => Self::List { terms: params },
            "add" => {
                let (index, rest) = split_index("add", params)?;
                Self::Add { index, entries: pairs("add", rest)? }
            },
            "set" => {
                let (index, rest) = split_index("set", params)?;
                Self::Set { index, entries: pairs("set", rest)? }
            },
            "del" => {
                let (index, keywords) = split_index("del", params)?;
                if keywords.is_empty() {
                    exn::bail!(ErrorKind::InvalidParameters("del"));
                }
                Self::Del { index, keywords }
            },
            "save-search" => Self::SaveSearch { filename: single("save-search", params)? },
            "save" => Self::Save { filename: single("save", params)? },
            _ => exn::bail!(ErrorKind::UnknownCommand(name.to_string())),
        };
        Ok(Some(command))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Load { .. } => "load",
            Self::List { .. } => "list",
            Self::Add { .. } => "add",
            Self::Set { .. } => "set",
            Self::Del { .. } => "del",
            Self::SaveSearch { .. } => "save-search",
            Self::Save { .. } => "save",
        }
    }

    /// Runs the command against `session`, writing operator output to `out`.
    ///
    /// A failing command leaves the library and the current result set as
    /// they were. `load` never fails part way: a file that cannot be read is
    /// reported and the remaining files are still loaded.
    #[instrument(skip_all, fields(command = self.name()))]
    pub fn execute(self, session: &mut Session, out: &mut impl Write) -> Result<Outcome> {
        match self {
            Self::Help => {
                write!(out, "{HELP}").or_raise(|| ErrorKind::Output)?;
                Ok(Outcome::Done)
            },
            Self::Quit => Ok(Outcome::Quit),
            Self::Load { files } => load(files, session, out),
            Self::List { terms } => Ok(Outcome::Results(ResultSet::new(session.library.search(&terms)))),
            Self::Add { index, entries } => {
                let id = target(session, index)?;
                let file = session.library.get_mut(id).map_err(ErrorKind::media)?;
                file.add_metadata(entries).map_err(ErrorKind::media)?;
                say!(out, "{index}: {file}")?;
                Ok(Outcome::Done)
            },
            Self::Set { index, entries } => {
                let id = target(session, index)?;
                let file = session.library.get_mut(id).map_err(ErrorKind::media)?;
                file.set_metadata(entries).map_err(ErrorKind::media)?;
                say!(out, "{index}: {file}")?;
                Ok(Outcome::Done)
            },
            Self::Del { index, keywords } => {
                let id = target(session, index)?;
                let file = session.library.get_mut(id).map_err(ErrorKind::media)?;
                file.remove_metadata(&keywords).map_err(ErrorKind::media)?;
                say!(out, "{index}: {file}")?;
                Ok(Outcome::Done)
            },
            Self::SaveSearch { filename } => {
                let results = session.results().ok_or_raise(|| ErrorKind::MissingResultSet)?;
                let files = results.files(&session.library)?;
                let path = save(&filename, files.iter().copied()).map_err(ErrorKind::import)?;
                say!(out, "> {} files saved to {}", files.len(), path.display())?;
                Ok(Outcome::Done)
            },
            Self::Save { filename } => {
                let path = save(&filename, session.library.all()).map_err(ErrorKind::import)?;
                say!(out, "> {} files saved to {}", session.library.count(), path.display())?;
                Ok(Outcome::Done)
            },
        }
    }
}

fn load(files: Vec<String>, session: &mut Session, out: &mut impl Write) -> Result<Outcome> {
    if files.is_empty() {
        exn::bail!(ErrorKind::InvalidParameters("load"));
    }
    let before = session.library.count();
    for filename in &files {
        let import = match session.importer.read(filename) {
            Ok(import) => import,
            Err(err) => {
                tracing::warn!(%filename, error = ?err, "could not resolve file");
                say!(out, "> {filename}: {}", *err)?;
                continue;
            },
        };
        write!(out, "{}", import.report()).or_raise(|| ErrorKind::Output)?;
        session.library.extend(import.files);
    }
    let added = session.library.count().saturating_sub(before);
    say!(out, "{added} files loaded successfully.")?;
    for (index, file) in session.library.all().iter().enumerate().skip(before) {
        say!(out, "{index}: {}", file.filename())?;
    }
    Ok(Outcome::Done)
}

fn target(session: &Session, index: usize) -> Result<FileId> {
    session.results().ok_or_raise(|| ErrorKind::MissingResultSet)?.get(index)
}

fn split_index(command: &'static str, mut params: Vec<String>) -> Result<(usize, Vec<String>)> {
    if params.is_empty() {
        exn::bail!(ErrorKind::InvalidParameters(command));
    }
    let index = params.remove(0).parse::<usize>().or_raise(|| ErrorKind::InvalidParameters(command))?;
    Ok((index, params))
}

fn pairs(command: &'static str, params: Vec<String>) -> Result<Vec<MetadataEntry>> {
    if params.is_empty() || params.len() % 2 != 0 {
        exn::bail!(ErrorKind::InvalidParameters(command));
    }
    let mut params = params.into_iter();
    let mut entries = Vec::new();
    while let (Some(keyword), Some(value)) = (params.next(), params.next()) {
        entries.push(MetadataEntry::new(keyword, value));
    }
    Ok(entries)
}

fn single(command: &'static str, params: Vec<String>) -> Result<String> {
    match <[String; 1]>::try_from(params) {
        Ok([filename]) => Ok(filename),
        Err(_) => exn::bail!(ErrorKind::InvalidParameters(command)),
    }
}

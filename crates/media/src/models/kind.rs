use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::consts::{CREATOR, RESOLUTION, RUNTIME};
use crate::error::{Error, ErrorKind};

/// The closed set of media types a record may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Still images (photos, scans, artwork)
    Image,
    /// Text documents (books, papers, notes)
    Document,
    /// Sound recordings
    Audio,
    /// Moving pictures
    Video,
}
impl MediaKind {
    /// Every recognised kind, in display order.
    pub const ALL: [MediaKind; 4] = [MediaKind::Image, MediaKind::Document, MediaKind::Audio, MediaKind::Video];

    /// Returns the type tag used in JSON files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Document => "document",
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }

    /// Metadata keywords a file of this kind must always carry with a
    /// non-empty value.
    pub fn required_keywords(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &[CREATOR, RESOLUTION],
            MediaKind::Document => &[CREATOR],
            MediaKind::Audio => &[CREATOR, RUNTIME],
            MediaKind::Video => &[CREATOR, RESOLUTION, RUNTIME],
        }
    }

    /// Returns `true` if `keyword` is mandatory for this kind.
    pub fn requires(&self, keyword: &str) -> bool {
        self.required_keywords().contains(&keyword)
    }
}
impl TryFrom<String> for MediaKind {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl FromStr for MediaKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "image" => Self::Image,
            "document" => Self::Document,
            "audio" => Self::Audio,
            "video" => Self::Video,
            _ => exn::bail!(ErrorKind::UnknownKind(s.to_string())),
        })
    }
}
impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

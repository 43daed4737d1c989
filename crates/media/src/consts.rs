/// Who made the file. Mandatory for every kind.
pub const CREATOR: &str = "creator";
/// Pixel dimensions, e.g. `1920x1080`. Mandatory for images and video.
pub const RESOLUTION: &str = "resolution";
/// Playing time. Mandatory for audio and video.
pub const RUNTIME: &str = "runtime";

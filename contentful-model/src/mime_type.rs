//! Asset mime-type groups accepted by `linkMimetypeGroup` validations.

pub const ATTACHMENT: &str = "attachment";
pub const PLAIN_TEXT: &str = "plaintext";
pub const IMAGE: &str = "image";
pub const AUDIO: &str = "audio";
pub const VIDEO: &str = "video";
pub const RICH_TEXT: &str = "richtext";
pub const PRESENTATION: &str = "presentation";
pub const SPREADSHEET: &str = "spreadsheet";
pub const PDF: &str = "pdfdocument";
pub const ARCHIVE: &str = "archive";
pub const CODE: &str = "code";
pub const MARKUP: &str = "markup";

/// Every group, in the order the web app lists them.
pub const ALL: [&str; 12] = [
    ATTACHMENT,
    PLAIN_TEXT,
    IMAGE,
    AUDIO,
    VIDEO,
    RICH_TEXT,
    PRESENTATION,
    SPREADSHEET,
    PDF,
    ARCHIVE,
    CODE,
    MARKUP,
];

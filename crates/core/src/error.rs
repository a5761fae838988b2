use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL field could not be parsed at all.
    #[error("{label} is not a valid URL ({raw:?}): {source}")]
    InvalidUrl {
        label: String,
        raw: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{label} must be http(s), got: {scheme}")]
    UnsupportedScheme { label: String, scheme: String },

    #[error("{label} has invalid port: {raw}")]
    InvalidPort { label: String, raw: String },

    /// The control port leaves no room for the derived CDP port (control + 1).
    #[error(
        "browser.controlUrl port ({control_port}) is too high; cannot derive CDP port ({derived})"
    )]
    CdpPortOverflow { control_port: u16, derived: u32 },

    #[error("Profile \"{0}\" must define cdpPort or cdpUrl.")]
    UnresolvableProfile(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    /// The routing runtime only ever reports PUSH, REPLACE and POP.
    #[error("Unexpected NavigationType \"{0}\"")]
    UnexpectedNavigationType(String),

    #[error("Invalid location URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Navigation event needs either a pathname or a url")]
    MissingLocation,
}

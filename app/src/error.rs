use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("invalid mount point selector {0}")]
    InvalidSelector(String),

    /// The host document does not contain the element the application is mounted into.
    #[error("mount point {0} does not exist")]
    MountPointMissing(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dsn: {0}")]
    InvalidDsn(#[from] crate::dsn::DsnError),

    #[error("no {0} available")]
    Unavailable(&'static str),
}

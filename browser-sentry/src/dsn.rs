use std::{fmt, str::FromStr};

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DsnError {
    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported scheme {0}")]
    UnsupportedScheme(String),
    #[error("missing public key")]
    MissingPublicKey,
    #[error("missing host")]
    MissingHost,
    #[error("missing project id")]
    MissingProjectId,
}

/// Parsed client key of a project, `{scheme}://{public_key}@{host}{path}/{project_id}`.
///
/// `path` is empty unless the server is hosted under a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    scheme: String,
    public_key: String,
    host: String,
    port: Option<u16>,
    path: String,
    project_id: String,
}

impl Dsn {
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn base(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{port}{}", self.scheme, self.host, self.path),
            None => format!("{}://{}{}", self.scheme, self.host, self.path),
        }
    }

    pub fn envelope_url(&self) -> String {
        format!("{}/api/{}/envelope/", self.base(), self.project_id)
    }

    pub fn auth_header(&self, client: &str) -> String {
        format!(
            "Sentry sentry_version=7, sentry_client={client}, sentry_key={}",
            self.public_key
        )
    }

    /// Url of the script which renders the user feedback dialog for `event_id`.
    pub fn report_dialog_url(&self, event_id: uuid::Uuid) -> String {
        let dsn = self.to_string();
        format!(
            "{}/api/embed/error-page/?eventId={}&dsn={}",
            self.base(),
            event_id.as_simple(),
            utf8_percent_encode(&dsn, NON_ALPHANUMERIC)
        )
    }
}

impl FromStr for Dsn {
    type Err = DsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s)?;

        let scheme = url.scheme();
        if !matches!(scheme, "http" | "https") {
            return Err(DsnError::UnsupportedScheme(scheme.to_owned()));
        }

        if url.username().is_empty() {
            return Err(DsnError::MissingPublicKey);
        }

        let host = url.host_str().ok_or(DsnError::MissingHost)?;

        let mut segments: Vec<_> = url.path_segments().into_iter().flatten().collect();
        let project_id = segments
            .pop()
            .filter(|id| !id.is_empty())
            .ok_or(DsnError::MissingProjectId)?;
        let path = segments.iter().map(|segment| format!("/{segment}")).collect();

        Ok(Self {
            scheme: scheme.to_owned(),
            public_key: url.username().to_owned(),
            host: host.to_owned(),
            port: url.port(),
            path,
            project_id: project_id.to_owned(),
        })
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}@{}", self.scheme, self.public_key, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        write!(f, "{}/{}", self.path, self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DSN: &str = "https://d26eb17a90ee4de8a19e666ebb7a39a1@o422150.ingest.sentry.io/5345475";

    #[test]
    fn test_parse() {
        let dsn: Dsn = DSN.parse().unwrap();

        assert_eq!(dsn.public_key(), "d26eb17a90ee4de8a19e666ebb7a39a1");
        assert_eq!(dsn.host(), "o422150.ingest.sentry.io");
        assert_eq!(dsn.project_id(), "5345475");
        assert_eq!(dsn.to_string(), DSN);
    }

    #[test]
    fn test_urls() {
        let dsn: Dsn = DSN.parse().unwrap();

        assert_eq!(
            dsn.envelope_url(),
            "https://o422150.ingest.sentry.io/api/5345475/envelope/"
        );
        assert_eq!(
            dsn.auth_header("bustracker/1.0"),
            "Sentry sentry_version=7, sentry_client=bustracker/1.0, sentry_key=d26eb17a90ee4de8a19e666ebb7a39a1"
        );

        let id = uuid::Uuid::parse_str("67e5504410b1426f9247bb680e5fe0c8").unwrap();
        let url = dsn.report_dialog_url(id);
        assert!(url.starts_with(
            "https://o422150.ingest.sentry.io/api/embed/error-page/?eventId=67e5504410b1426f9247bb680e5fe0c8&dsn=https%3A%2F%2F"
        ));
    }

    #[test]
    fn test_port() {
        let dsn: Dsn = "http://key@localhost:9000/42".parse().unwrap();
        assert_eq!(dsn.envelope_url(), "http://localhost:9000/api/42/envelope/");
        assert_eq!(dsn.to_string(), "http://key@localhost:9000/42");
    }

    #[test]
    fn test_path_prefix() {
        let dsn: Dsn = "https://key@sentry.example.com/prefix/42".parse().unwrap();

        assert_eq!(dsn.project_id(), "42");
        assert_eq!(dsn.to_string(), "https://key@sentry.example.com/prefix/42");
        assert_eq!(
            dsn.envelope_url(),
            "https://sentry.example.com/prefix/api/42/envelope/"
        );

        let id = uuid::Uuid::parse_str("67e5504410b1426f9247bb680e5fe0c8").unwrap();
        assert_eq!(
            dsn.report_dialog_url(id),
            "https://sentry.example.com/prefix/api/embed/error-page/\
             ?eventId=67e5504410b1426f9247bb680e5fe0c8\
             &dsn=https%3A%2F%2Fkey%40sentry%2Eexample%2Ecom%2Fprefix%2F42"
        );
    }

    #[test]
    fn test_invalid() {
        assert_eq!(
            "https://o422150.ingest.sentry.io/1".parse::<Dsn>(),
            Err(DsnError::MissingPublicKey)
        );
        assert_eq!(
            "https://key@o422150.ingest.sentry.io/".parse::<Dsn>(),
            Err(DsnError::MissingProjectId)
        );
        assert_eq!(
            "ftp://key@o422150.ingest.sentry.io/1".parse::<Dsn>(),
            Err(DsnError::UnsupportedScheme("ftp".to_owned()))
        );
        assert!(matches!(
            "not a dsn".parse::<Dsn>(),
            Err(DsnError::InvalidUrl(_))
        ));
    }
}

//! Error types for the GeoNames client

use std::fmt;

/// Error codes returned by the GeoNames service
///
/// See <http://www.geonames.org/export/webservice-exception.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    AuthorizationException,
    RecordDoesNotExist,
    Other,
    DatabaseTimeout,
    InvalidParameter,
    NoResultsFound,
    DuplicateException,
    PostalCodeNotFound,
    DailyCreditLimitExceeded,
    HourlyCreditLimitExceeded,
    WeeklyCreditLimitExceeded,
    InvalidInput,
    ServerOverload,
    ServiceNotImplemented,
}

impl ServiceErrorKind {
    /// Map a numeric service code to its kind
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            10 => Some(Self::AuthorizationException),
            11 => Some(Self::RecordDoesNotExist),
            12 => Some(Self::Other),
            13 => Some(Self::DatabaseTimeout),
            14 => Some(Self::InvalidParameter),
            15 => Some(Self::NoResultsFound),
            16 => Some(Self::DuplicateException),
            17 => Some(Self::PostalCodeNotFound),
            18 => Some(Self::DailyCreditLimitExceeded),
            19 => Some(Self::HourlyCreditLimitExceeded),
            20 => Some(Self::WeeklyCreditLimitExceeded),
            21 => Some(Self::InvalidInput),
            22 => Some(Self::ServerOverload),
            23 => Some(Self::ServiceNotImplemented),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::AuthorizationException => 10,
            Self::RecordDoesNotExist => 11,
            Self::Other => 12,
            Self::DatabaseTimeout => 13,
            Self::InvalidParameter => 14,
            Self::NoResultsFound => 15,
            Self::DuplicateException => 16,
            Self::PostalCodeNotFound => 17,
            Self::DailyCreditLimitExceeded => 18,
            Self::HourlyCreditLimitExceeded => 19,
            Self::WeeklyCreditLimitExceeded => 20,
            Self::InvalidInput => 21,
            Self::ServerOverload => 22,
            Self::ServiceNotImplemented => 23,
        }
    }

    /// Human-readable category for the code
    pub fn description(self) -> &'static str {
        match self {
            Self::AuthorizationException => "authorization exception",
            Self::RecordDoesNotExist => "record does not exist",
            Self::Other => "other error",
            Self::DatabaseTimeout => "database timeout",
            Self::InvalidParameter => "invalid parameter",
            Self::NoResultsFound => "no results found",
            Self::DuplicateException => "duplicate exception",
            Self::PostalCodeNotFound => "postal code not found",
            Self::DailyCreditLimitExceeded => "daily credit limit exceeded",
            Self::HourlyCreditLimitExceeded => "hourly credit limit exceeded",
            Self::WeeklyCreditLimitExceeded => "weekly credit limit exceeded",
            Self::InvalidInput => "invalid input",
            Self::ServerOverload => "server overload",
            Self::ServiceNotImplemented => "service not implemented",
        }
    }

    /// Whether the code reports an exhausted credit allowance
    pub fn is_credit_limit(self) -> bool {
        matches!(
            self,
            Self::DailyCreditLimitExceeded
                | Self::HourlyCreditLimitExceeded
                | Self::WeeklyCreditLimitExceeded
        )
    }
}

/// Error reported by the service in a `status` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub code: u16,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The known kind for this code, if the service sent one of the documented codes
    pub fn kind(&self) -> Option<ServiceErrorKind> {
        ServiceErrorKind::from_code(self.code)
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{} ({}): {}", kind.description(), self.code, self.message),
            None => write!(f, "unknown service error ({}): {}", self.code, self.message),
        }
    }
}

/// Errors from the GeoNames client
#[derive(Debug)]
pub enum GeoNamesError {
    /// The request failed before a response was obtained
    Http(Box<reqwest::Error>),
    /// The service answered with a non-success status and no error document
    HttpStatus(u16),
    /// The service answered with an error document
    Service(ServiceError),
    /// The body did not match the expected schema
    MalformedResponse(String),
    /// The configured base URL cannot be turned into a request URL
    InvalidBaseUrl(String),
}

impl GeoNamesError {
    /// True for failures at the transport level (connect, DNS, TLS, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for GeoNamesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {}", err),
            Self::HttpStatus(status) => write!(f, "GeoNames returned status {}", status),
            Self::Service(err) => write!(f, "GeoNames error: {}", err),
            Self::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            Self::InvalidBaseUrl(msg) => write!(f, "Invalid base URL: {}", msg),
        }
    }
}

impl std::error::Error for GeoNamesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeoNamesError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<serde_json::Error> for GeoNamesError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for GeoNamesError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidBaseUrl(err.to_string())
    }
}

impl From<ServiceError> for GeoNamesError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

pub type Result<T> = std::result::Result<T, GeoNamesError>;

use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::{prelude::StatusError, writer::Json, Piece};
    use serde::Serialize;

    use super::{
        http::ErrorResponse,
        persistence::PersistenceError,
        resource::{InputError, NotFoundError, ValidationError},
    };

    #[derive(Debug, Display, Serialize)]
    pub enum ApplicationError<R> {
        #[display(fmt = "{_0}")]
        Validation(ValidationError<R>),
        #[display(fmt = "{_0}")]
        Input(InputError),
        #[display(fmt = "{_0}")]
        NotFound(NotFoundError),
        #[display(fmt = "{_0}")]
        Persistence(PersistenceError),
    }

    impl<R: std::fmt::Debug> std::error::Error for ApplicationError<R> {}

    impl<R> From<ValidationError<R>> for ApplicationError<R> {
        fn from(err: ValidationError<R>) -> Self {
            Self::Validation(err)
        }
    }

    impl<R> From<InputError> for ApplicationError<R> {
        fn from(err: InputError) -> Self {
            Self::Input(err)
        }
    }

    impl<R> From<NotFoundError> for ApplicationError<R> {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl<R> From<PersistenceError> for ApplicationError<R> {
        fn from(err: PersistenceError) -> Self {
            Self::Persistence(err)
        }
    }

    impl<R> ApplicationError<R> {
        pub fn status(&self) -> StatusError {
            match self {
                ApplicationError::Validation(_) | ApplicationError::Input(_) => {
                    StatusError::unprocessable_entity()
                }
                ApplicationError::NotFound(_) => StatusError::not_found(),
                ApplicationError::Persistence(_) => StatusError::service_unavailable(),
            }
        }
    }

    impl<R: Serialize + Send> Piece for ApplicationError<R> {
        fn render(self, res: &mut salvo::Response) {
            let status = self.status();
            let message = self.to_string();
            match &self {
                ApplicationError::Persistence(err) => tracing::error!("storage failure: {err}"),
                _ => tracing::debug!("rejecting request: {message}"),
            }
            res.render(Json(ErrorResponse::new(&status, message, self)));
            res.set_status_error(status);
        }
    }
}

pub mod persistence {
    use std::io;

    use derive_more::Display;
    use serde::Serialize;

    use super::UnknownError;

    pub type SqlState = String;

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(io::Error),
        #[display(fmt = "persistence layer timed out acquiring a connection")]
        Timeout,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    /// Storage failures never leak driver details into a response body.
    impl Serialize for PersistenceError {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_none()
        }
    }

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(io::ErrorKind::InvalidInput.into())
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(io),
                SqlxError::Tls(_) => Self::Connection(io::ErrorKind::ConnectionRefused.into()),
                SqlxError::Protocol(msg) => {
                    Self::Connection(io::Error::new(io::ErrorKind::InvalidData, msg))
                }
                SqlxError::TypeNotFound { .. }
                | SqlxError::ColumnIndexOutOfBounds { .. }
                | SqlxError::ColumnNotFound(_)
                | SqlxError::ColumnDecode { .. }
                | SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Timeout,
                SqlxError::PoolClosed => Self::Connection(io::ErrorKind::NotConnected.into()),
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use derive_more::Display;
    use serde::{Deserialize, Serialize};

    use crate::base::ResourceID;

    /// Ordered the way violations of one field are reported.
    #[derive(
        Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    )]
    pub enum ValidationErrorKind {
        /// When a required property is missing or blank.
        Required,
        /// Minimum inclusive string length.
        #[display(fmt = "MinLength({_0})")]
        MinLength(u64),
        /// When the input doesn't match to a pattern.
        #[display(fmt = "Pattern({_0})")]
        Pattern(String),
        /// Generic kind.
        Invalid,
    }

    impl std::error::Error for ValidationErrorKind {}

    /// A single violated constraint and the message reported for it.
    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[display(fmt = "{kind}: {message}")]
    pub struct Violation {
        pub kind: ValidationErrorKind,
        pub message: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
    pub struct ValidationError<R> {
        /// Resource value
        pub resource: R,
        /// Name of the resource
        pub resource_type: &'static str,
        /// Invalid resource fields
        pub fields: Vec<ValidationFieldError>,
    }

    impl<R> ValidationError<R> {
        pub fn from_resource(resource: R, fields: Vec<ValidationFieldError>) -> Self
        where
            R: ResourceID,
        {
            Self {
                resource,
                resource_type: R::resource_id(),
                fields,
            }
        }

        pub fn messages(&self) -> impl Iterator<Item = &str> {
            self.fields
                .iter()
                .flat_map(|field| field.violations.iter().map(|v| v.message.as_str()))
        }
    }

    impl<R> std::fmt::Display for ValidationError<R> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let messages: Vec<&str> = self.messages().collect();
            write!(f, "Invalid resource {}: {}", self.resource_type, messages.join("; "))
        }
    }

    impl<R: std::fmt::Debug> std::error::Error for ValidationError<R> {}

    #[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[display(fmt = "{path}: {value:?}, {violations:?}")]
    pub struct ValidationFieldError {
        /// Resource field path with invalid value
        pub path: String,
        /// Displayed invalid value
        pub value: String,
        /// Violated constraints
        pub violations: Vec<Violation>,
    }

    impl std::error::Error for ValidationFieldError {}

    impl ValidationFieldError {
        pub fn new(path: String, value: String, violations: Vec<Violation>) -> Self {
            Self {
                path,
                value,
                violations,
            }
        }
    }

    /// Request shape errors detected before any field rule runs.
    #[derive(Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub enum InputError {
        #[display(fmt = "Id was invalidly set on request.")]
        IdProvided { id: i64 },
        #[display(fmt = "User params were not set on request.")]
        MissingFields { fields: Vec<String> },
    }

    impl std::error::Error for InputError {}

    #[derive(Debug, Display, Clone, PartialEq, Eq, Serialize)]
    #[display(fmt = "User with id of {resource_id} does not exist.")]
    pub struct NotFoundError {
        /// Resource id, as requested
        pub resource_id: String,
        /// Name of the resource
        pub resource_type: &'static str,
    }

    impl std::error::Error for NotFoundError {}

    impl NotFoundError {
        pub fn from_resource<R: ResourceID>(resource_id: impl std::fmt::Display) -> Self {
            Self {
                resource_id: resource_id.to_string(),
                resource_type: R::resource_id(),
            }
        }
    }
}

pub mod http {
    use derive_more::{Display, Error};
    use salvo::{http::ParseError, prelude::StatusError, writer::Json, Piece, Response};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Display, Clone, Error, Serialize, Deserialize)]
    pub enum BadRequest {
        InvalidContent,
    }

    #[derive(Debug, Display, Clone, Serialize, Deserialize)]
    #[display(fmt = "Response error: {title}, {message}")]
    pub struct ErrorResponse<T> {
        pub title: String,
        pub message: String,
        pub error: T,
    }

    impl<T> ErrorResponse<T> {
        pub fn new(status: &StatusError, message: String, err: T) -> Self {
            Self {
                title: status.name.clone(),
                message,
                error: err,
            }
        }

        pub fn from_status_error(status: &StatusError, err: T) -> Self {
            let message = status
                .summary
                .clone()
                .unwrap_or_else(|| status.name.clone());
            Self::new(status, message, err)
        }
    }

    impl From<ParseError> for BadRequest {
        fn from(err: ParseError) -> Self {
            tracing::debug!("rejecting request body: {err}");
            BadRequest::InvalidContent
        }
    }

    impl Piece for BadRequest {
        fn render(self, res: &mut Response) {
            let status = StatusError::bad_request();
            res.render(Json(ErrorResponse::from_status_error(&status, self)));
            res.set_status_error(status);
        }
    }
}

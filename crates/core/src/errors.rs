use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("transcript must contain at least one message")]
    EmptyTranscript,
    #[error("customer profile is missing required field `{field}`")]
    InvalidProfile { field: &'static str },
    #[error("catalog invariant violation: {0}")]
    InvalidCatalog(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog source failure: {0}")]
    CatalogSource(String),
    #[error("template rendering failure: {0}")]
    Rendering(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Internal { .. } => "Failed to process request",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error @ DomainError::EmptyTranscript)
            | ApplicationError::Domain(error @ DomainError::InvalidProfile { .. }) => {
                Self::BadRequest {
                    message: error.to_string(),
                    correlation_id: "unassigned".to_owned(),
                }
            }
            ApplicationError::Domain(error @ DomainError::InvalidCatalog(_)) => Self::Internal {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::CatalogSource(message)
            | ApplicationError::Rendering(message)
            | ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn empty_transcript_maps_to_bad_request() {
        let interface =
            ApplicationError::from(DomainError::EmptyTranscript).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ..
            } if correlation_id == "req-1"
        ));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn invalid_profile_message_names_the_field() {
        let interface = ApplicationError::from(DomainError::InvalidProfile { field: "email" })
            .into_interface("req-2");

        match interface {
            InterfaceError::BadRequest { message, .. } => assert!(message.contains("email")),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn rendering_error_maps_to_internal() {
        let interface =
            ApplicationError::Rendering("unknown template".to_owned()).into_interface("req-3");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "Failed to process request");
        assert_eq!(interface.correlation_id(), "req-3");
    }

    #[test]
    fn broken_catalog_is_not_blamed_on_the_caller() {
        let interface =
            ApplicationError::from(DomainError::InvalidCatalog("duplicate id 3".to_owned()))
                .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
    }
}

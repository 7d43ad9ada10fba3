//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for svcscan
#[derive(Error, Debug)]
pub enum Error {
    /// A module could not be loaded by name
    #[error("Module load error: {module}: {message}")]
    ModuleLoad {
        /// Name of the module that failed to load
        module: String,
        /// Description of the failure
        message: String,
    },

    /// A discovery method was called before any module was selected
    #[error("No modules specified: select at least one module before discovering types")]
    NoModulesSpecified,

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Operation is not valid for the current configuration
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of the invalid operation
        message: String,
    },

    /// The container rejected a descriptor
    #[error("Registration error for {type_name}: {message}")]
    Registration {
        /// Full name of the type being registered
        type_name: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A service factory produced no instance
    #[error("Factory for service {service_type} returned no instance")]
    FactoryReturnedNone {
        /// Full name of the requested service type
        service_type: String,
    },

    /// A cache was used after being closed
    #[error("Cache closed: {cache}")]
    CacheClosed {
        /// Name of the closed cache
        cache: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create a module load error
    pub fn module_load<M: Into<String>, S: Into<String>>(module: M, message: S) -> Self {
        Self::ModuleLoad {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid operation error
    pub fn invalid_operation<S: Into<String>>(message: S) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a registration error without an underlying source
    pub fn registration<T: Into<String>, S: Into<String>>(type_name: T, message: S) -> Self {
        Self::Registration {
            type_name: type_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a factory-returned-none error
    pub fn factory_returned_none<S: Into<String>>(service_type: S) -> Self {
        Self::FactoryReturnedNone {
            service_type: service_type.into(),
        }
    }

    /// Create a cache closed error
    pub fn cache_closed<S: Into<String>>(cache: S) -> Self {
        Self::CacheClosed {
            cache: cache.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is a fail-fast precondition violation
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoModulesSpecified | Self::InvalidArgument { .. } | Self::InvalidOperation { .. }
        )
    }
}

use thiserror::Error;
use vivaz_api_core::json::JsonError;

use crate::method::Method;
use crate::schema::ImportError;

/// Failures while evaluating a variable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("evaluation method '{0}' is not implemented")]
    NotImplemented(Method),
}

/// Failures while writing attributes into a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("attributes must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Value(#[from] JsonError),
    #[error("import: {0}")]
    Import(#[from] ImportError),
}

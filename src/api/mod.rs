//! REST API module.
//!
//! One handler per operation; each validates, queries the repository and shapes the body.

mod articles;
mod topics;
mod users;

pub use articles::*;
pub use topics::*;
pub use users::*;

use axum::Json;

use crate::errors::AppError;

/// Handler result: a JSON body on success, a classified failure otherwise.
pub type ApiResult<T> = Result<Json<T>, AppError>;

//! Gateway types module
//!
//! - [`response`]: `ApiResponse<T>` envelope, `MessageResponse`, error codes
//! - [`error`]: `ApiError` and the domain error → HTTP mapping
//! - [`extract`]: `ValidatedJson<T>` and `ApiPath<T>` request extractors
//! - [`money`]: amount validation for prices and totals
//! - [`text`]: blank-string rejection

pub mod error;
pub mod extract;
pub mod money;
pub mod response;
pub mod text;

// Re-export commonly used types at module root
pub use error::{ApiError, ApiResult, created, ok};
pub use extract::{ApiPath, ValidatedJson};
pub use money::validate_money;
pub use response::{ApiResponse, MessageResponse, error_codes};
pub use text::validate_not_blank;

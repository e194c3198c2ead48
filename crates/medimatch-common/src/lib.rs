pub mod models;
pub mod response;
pub mod validation;

// Re-export commonly used items
pub use models::auth::{Claims, User};
pub use models::doctor::{Doctor, DoctorMetadata, DoctorStatus, Severity};
pub use response::{ApiResponse, FieldError};

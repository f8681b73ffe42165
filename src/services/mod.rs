pub mod emergency_service;
pub mod notification_service;
pub mod user_service;

pub use emergency_service::*;
pub use notification_service::*;
pub use user_service::*;

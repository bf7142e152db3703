pub mod contact_service;
pub mod export_service;
pub mod user_service;

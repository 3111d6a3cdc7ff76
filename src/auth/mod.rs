pub mod auth_dto;
pub mod auth_handlers;
pub mod auth_service;
pub mod jwt;
pub mod password;
pub mod user_repository;

pub use jwt::{create_session_token, verify_jwt, Claims};
pub use password::{generate_password, hash_password, verify_password};

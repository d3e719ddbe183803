//! # market-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CategoryService, FieldErrors, ProductService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};

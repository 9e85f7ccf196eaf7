pub mod builder;
pub mod handlers;
pub mod service;
pub mod validation;

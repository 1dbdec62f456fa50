pub mod engine;
pub mod service;
pub mod signature;
pub mod translator;

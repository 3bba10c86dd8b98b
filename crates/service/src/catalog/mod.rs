pub mod mongo;
pub mod repository;
pub mod service;

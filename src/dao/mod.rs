/// Durable team record definitions.
pub mod models;
/// Storage error types shared by every backend.
pub mod storage;
/// Team store backends.
pub mod team_store;

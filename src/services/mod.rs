/// Live-change event dispatch into the durable store.
pub mod event_service;
/// Pending invite delivery.
pub mod invite_service;
/// Host-facing lifecycle facade.
pub mod lifecycle;
/// Startup merge of durable records into the live registry.
pub mod restore_service;
/// Full captures of the live registry.
pub mod snapshot_service;

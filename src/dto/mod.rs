/// Live-change notifications received from the host.
pub mod events;
/// Client notifications sent by the saver.
pub mod notification;

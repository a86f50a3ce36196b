pub mod audio;
pub mod chat_session;
pub mod context_service;

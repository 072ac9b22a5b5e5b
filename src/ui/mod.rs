pub mod app_context;
pub mod session_manager;
pub mod web_server;

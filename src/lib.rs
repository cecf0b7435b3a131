pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod library;
pub mod media;
pub mod models;
pub mod resolver;
pub mod state;
pub mod video_id;
pub mod ytdlp;

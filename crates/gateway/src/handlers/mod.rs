//! HTTP handlers.

mod job_handler;
mod ping_handler;
mod user_handler;

pub use job_handler::{job_routes, CreateJobRequest};
pub use ping_handler::{ping, PingResponse};
pub use user_handler::{user_routes, CreateUserRequest};

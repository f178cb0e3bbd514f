//! Web module - HTTP dashboard serving

mod server;

pub use server::{build_router, render_page, serve, Dashboard};

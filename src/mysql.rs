pub mod client;
mod executor;

pub use client::Instance;

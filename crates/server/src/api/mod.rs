pub mod conversions;
pub mod handlers;
pub mod janitor;
pub mod routes;

pub use routes::create_router;

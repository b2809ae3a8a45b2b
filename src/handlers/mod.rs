pub mod config;
pub mod distance;
pub mod get;
pub mod health;
pub mod places;
pub mod put;
pub mod review;

pub use config::config_handler;
pub use distance::distance_handler;
pub use get::get_handler;
pub use health::health_handler;
pub use places::{autocomplete_handler, details_handler, photo_handler};
pub use put::put_handler;
pub use review::review_handler;

pub mod datasets;
pub mod health;
pub mod valid_values;

pub use datasets::datasets_handler;
pub use health::health_handler;
pub use valid_values::valid_values_handler;

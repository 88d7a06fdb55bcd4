pub mod api;
pub mod conf;
pub mod core;
pub mod location;
pub mod model;
pub mod source;
pub mod table;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

mod address;
mod debounce;
mod geocoder;
mod resolver;

pub use address::normalize_address;
pub use debounce::Debouncer;
pub use geocoder::{AddressComponent, GeocodeCandidate, Geocoder, Geometry};
pub use resolver::LocationResolver;

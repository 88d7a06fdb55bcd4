mod coordinate;
mod load;
mod location;
mod status;

pub use coordinate::Coordinate;
pub use load::{Facility, Load, LoadId, Stop, TimeFrame, TimeFrameKind, Truck};
pub use location::ResolvedLocation;
pub use status::{LoadStatus, StopStatus, StopType};

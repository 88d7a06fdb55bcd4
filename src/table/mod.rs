mod controller;
mod query;
mod selection;
mod session;

pub use controller::{FilterPhase, QueryController};
pub use query::{
    FilterField, FilterInput, Filters, Sort, SortDirection, SortField, TableQuery,
};
pub use selection::Selection;
pub use session::{FetchTicket, LoadRow, LoadTable, Notification};

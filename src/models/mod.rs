pub mod query;
pub mod restaurant;

pub use query::{FieldError, PlaceQuery, QueryError, RawPlaceQuery};
pub use restaurant::{PlaceResult, Restaurant};

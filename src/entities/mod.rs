pub mod prelude;

pub mod restaurants;

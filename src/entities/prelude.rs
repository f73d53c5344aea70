pub use super::restaurants::Entity as Restaurants;

//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod advertisement;
pub mod validation;

pub use advertisement::{
    AdTitle, Advertisement, AdvertisementField, AdvertisementPatch, CreateAdvertisement,
    MIN_TITLE_LEN,
};
pub use validation::ValidationError;

//! Domain types shared by the dataset model and the series builder.

pub mod country;
pub mod percent;

pub use country::{Country, CountryTable, COUNTRIES};
pub use percent::Percent;

/// Question identifier, shared by the theme file and the country-data file.
pub type QuestionId = String;

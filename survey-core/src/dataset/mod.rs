//! Dataset model: the theme/question list and per-question country records.

mod load;
pub mod model;
pub mod raw;

pub use model::{
    Answer, CountryRecord, Dataset, DatasetStats, PresentationMode, Question, RawShares,
    RecordBody, Subanswer, Theme,
};
pub use raw::{CountryDocument, Flag, ThemeDocument};

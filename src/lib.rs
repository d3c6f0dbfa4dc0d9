//! Tidies up a directory holding one album: renames tracks after their tags, extracts the cover,
//! transcodes everything to one format and writes an ordered playlist.

pub mod artwork;
pub mod config;
pub mod convert;
pub mod driver;
pub mod error;
pub mod normalize;
pub mod order;
pub mod playlist;
pub mod report;
pub mod scan;
pub mod tags;
pub mod track;

pub use config::Config;
pub use driver::run;
pub use error::ScrubError;
pub use track::Track;

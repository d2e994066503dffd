// Textplace library: overlay styled text entries onto raster images

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod placement;

pub use error::PlaceTextError;

//! Location subsystem for Coastwatch.
//!
//! Maps free-form identifiers to coordinates: literal `"lat,lon"` pairs, a
//! built-in directory of coastal cities, and hash-derived placeholder
//! coordinates for everything else.

pub mod directory;
pub mod resolver;
pub mod synthetic;
pub mod types;

pub use directory::{city_list, default_city, directory, format_coords, lookup, CityInfo};
pub use resolver::{from_coordinates, resolve};
pub use synthetic::{string_hash, synthesize};
pub use types::{CoastalCity, LocationSource, ResolvedLocation};

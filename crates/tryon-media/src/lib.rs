//! Image preparation for try-on submissions.
//!
//! - [`ImageNormalizer`]: decode, drop alpha/palette, bound the size, encode as
//!   an inline JPEG payload
//! - [`GarmentSource`]: resolve a garment from uploaded bytes or a remote URL

pub mod config;
pub mod error;
pub mod garment;
pub mod normalize;

pub use config::MediaConfig;
pub use error::{MediaError, MediaResult};
pub use garment::GarmentSource;
pub use normalize::{encode, normalize, resize, ColorMode, Image, ImageNormalizer};

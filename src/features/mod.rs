//! Feature extraction, selection and normalization
//!
//! Raw text flows through here in one direction:
//! lines → [`FrequencyTable`]s → selected counts → unit-length vectors.

mod extract;
mod normalize;
pub mod plane;
mod select;

pub use extract::{extract, extract_reader, FeatureExtractor, FrequencyTable, RawFeatures};
pub use normalize::{normalize, squared_norm};
pub use plane::{all_planes, code_plane, CodePlane};
pub use select::select;

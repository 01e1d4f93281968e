pub mod degree_order;
pub mod kmotif;
pub mod kstar;

pub use degree_order::DegreeOrdering;
pub use kmotif::{KMotifs, MAX_MOTIF_SIZE, MotifCounter};
pub use kstar::{KStars, StarBoundEstimator, StarBounds, choose};

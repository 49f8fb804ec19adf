//! Pure analysis passes over a configuration tree: validation,
//! improvement recommendations, and responsive scaling.

mod recommend;
mod scale;
mod validation;

pub use recommend::{
    contrast_ratio, recommend, Priority, Recommendation, RecommendationKind,
};
pub use scale::rescale;
pub use validation::{validate, ValidationReport};

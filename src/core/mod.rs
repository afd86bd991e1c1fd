pub mod aggregate;
pub mod boundary;
pub mod dataset;
pub mod types;

pub use aggregate::{Estimator, EstimatorEntry, Reducer};
pub use boundary::{DeviationKind, NormalRange};
pub use dataset::Dataset;
pub use types::{
    Day, Dimension, MealTime, NumericColumn, Record, Sex, Smoker, SubplotGrid, capitalize,
};

pub mod catalog;
pub mod client;
pub mod dataset;
pub mod date_range;
pub mod normalize;
pub mod observation;
pub mod parameter;
pub mod station;

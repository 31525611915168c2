pub mod cry;
pub mod normalize;
pub mod query;

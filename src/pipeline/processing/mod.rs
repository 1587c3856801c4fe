// Text processing stages

pub mod normalize;

mod rfq;

pub use rfq::*;

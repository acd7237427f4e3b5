pub mod method;
pub mod property;
pub mod tree;

mod filter;
pub use filter::*;

mod work;
pub use work::*;

#[cfg(test)]
pub(crate) mod test_support;

//! Commonly used utilities like handles, pools and hashes.

#[macro_use]
pub mod handle;
pub mod data_vec;
pub mod handle_pool;
pub mod hash;
pub mod hash_value;

pub mod prelude {
    pub use super::data_vec::DataVec;
    pub use super::handle::{Handle, HandleIndex, HandleLike};
    pub use super::handle_pool::HandlePool;
    pub use super::hash::{FastHashMap, FastHashSet};
    pub use super::hash_value::HashValue;
}

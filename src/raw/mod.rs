mod arena;
mod handle;
mod node;
mod raw_radix_tree;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub use node::Node;
pub(crate) use raw_radix_tree::RawRadixTree;

pub mod edgelist;

pub use edgelist::{EdgeList, ParseMode};

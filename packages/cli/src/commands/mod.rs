pub mod blocks;
pub mod replay;

pub use blocks::{blocks, BlocksArgs};
pub use replay::{replay, ReplayArgs};

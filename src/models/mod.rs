mod order;
mod subscriber;

pub use order::*;
pub use subscriber::*;

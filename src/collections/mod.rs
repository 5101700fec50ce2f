mod array;

pub use array::{ArrayCheck, ArraySchema};

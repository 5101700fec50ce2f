mod boolean;
mod date;
mod enumeration;
mod number;
mod string;

pub use boolean::BooleanSchema;
pub use date::{Component, DateCheck, DateSchema};
pub use enumeration::{EnumCheck, EnumSchema};
pub use number::{NumberCheck, NumberSchema};
pub use string::{StringCheck, StringSchema};

mod union;

pub use union::UnionSchema;

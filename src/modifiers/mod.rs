mod required;

pub use required::Required;

use crate::error::SchemaError;
use crate::value::Value;

/// Trait for types that can be validated after conversion to a [`Value`].
///
/// Implemented for JSON text (`&str`, `String`), raw JSON bytes (`&[u8]`),
/// `serde_json::Value` and [`Value`] itself.
pub trait ValidationInput {
    fn to_value(&self) -> Result<Value, SchemaError>;
}

impl ValidationInput for Value {
    fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(self.clone())
    }
}

impl ValidationInput for serde_json::Value {
    fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(Value::from(self.clone()))
    }
}

impl ValidationInput for str {
    fn to_value(&self) -> Result<Value, SchemaError> {
        serde_json::from_str::<serde_json::Value>(self)
            .map(Value::from)
            .map_err(|e| SchemaError::InvalidJson(e.to_string()))
    }
}

impl ValidationInput for String {
    fn to_value(&self) -> Result<Value, SchemaError> {
        self.as_str().to_value()
    }
}

impl ValidationInput for [u8] {
    fn to_value(&self) -> Result<Value, SchemaError> {
        serde_json::from_slice::<serde_json::Value>(self)
            .map(Value::from)
            .map_err(|e| SchemaError::InvalidJson(e.to_string()))
    }
}

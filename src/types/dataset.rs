use serde_json::Value;

/// Parsed but untyped payload of a fetched document.
///
/// Lives for one run only; the normalizer consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset(Value);

impl RawDataset {
    pub fn new(value: Value) -> Self {
        RawDataset(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawDataset {
    fn from(value: Value) -> Self {
        RawDataset(value)
    }
}

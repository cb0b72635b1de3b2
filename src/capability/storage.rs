use crate::nice_display::NiceDisplay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Read(String),
    Write(String),
    Serialize(String),
    Deserialize(String),
}

impl NiceDisplay for StorageError {
    fn message(&self) -> String {
        match self {
            StorageError::Read(err) => format!("Storage read error: {}", err),
            StorageError::Write(err) => format!("Storage write error: {}", err),
            StorageError::Serialize(err) => format!("Storage serialization error: {}", err),
            StorageError::Deserialize(err) => format!("Storage deserialization error: {}", err),
        }
    }
}

/// String-keyed, string-valued durable storage.
pub trait StorageCapability {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

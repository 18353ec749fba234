// Asset access
//
// Locates data files on disk and hands out typed handles for live sound instances.

mod handle;
mod loader;

pub use handle::{AssetHandle, AssetId, SoundAsset, SoundHandle};
pub use loader::{AssetLoader, AssetType};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Malformed asset {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("map.json".to_string());
        assert_eq!(err.to_string(), "Asset not found: map.json");
    }
}

/// RendererTexture trait and texture descriptor

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    D32_FLOAT,
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture can be used as depth attachment
    DepthStencil,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Optional initial data (raw pixel bytes)
    /// If provided, the data must match the size: width * height * bytes_per_pixel
    pub data: Option<Vec<u8>>,
}

/// Texture metadata, queryable on any texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
}

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., WgpuTexture).
/// The texture is automatically destroyed when dropped.
pub trait RendererTexture: Send + Sync {
    /// Get texture metadata
    fn info(&self) -> &TextureInfo;

    /// Downcast support: backends recover their concrete texture type
    /// when recording draws
    fn as_any(&self) -> &dyn std::any::Any;
}

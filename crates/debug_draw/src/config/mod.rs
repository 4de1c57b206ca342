//! Configuration system
//!
//! [`DrawConfig`] seeds the pools, the base meshes and the wireframe path of a
//! [`ShapeDrawer`](crate::debug::shape_drawer::ShapeDrawer). Per-draw
//! parameters are never read from here; they are passed at each call.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, picking the format from a file name or extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level drawer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Initial pool sizes and growth policy
    pub pools: PoolConfig,

    /// Fallback appearance values used by the convenience draw calls
    pub defaults: DefaultsConfig,

    /// Tessellation of the precomputed and dynamic meshes
    pub generation: GenerationConfig,

    /// Wireframe rendering capability
    pub wireframe: WireframeConfig,
}

impl Config for DrawConfig {}

/// Pool capacities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Line renderers created up front
    pub line_capacity: usize,
    /// Base-mesh objects created up front
    pub mesh_capacity: usize,
    /// Dynamic-mesh objects created up front
    pub dynamic_mesh_capacity: usize,
    /// Text labels created up front
    pub text_capacity: usize,
    /// Smallest capacity a pool grows to
    pub min_growth: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            line_capacity: 16,
            mesh_capacity: 4,
            dynamic_mesh_capacity: 0,
            text_capacity: 4,
            min_growth: 4,
        }
    }
}

/// Default appearance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Line width in world units
    pub line_width: f32,
    /// Point radius in world units
    pub point_radius: f32,
    /// Segments per elliptic arc
    pub arc_segments: u32,
    /// Segments per ring section
    pub ring_segments: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            line_width: 0.005,
            point_radius: 0.02,
            arc_segments: 32,
            ring_segments: 32,
        }
    }
}

/// Mesh tessellation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Meridians of the unit sphere base mesh
    pub sphere_meridians: u32,
    /// Parallels of the unit sphere base mesh
    pub sphere_parallels: u32,
    /// Meridians of dynamically generated capsules
    pub capsule_meridians: u32,
    /// Parallels per hemisphere of dynamically generated capsules
    pub capsule_cap_parallels: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sphere_meridians: 32,
            sphere_parallels: 15,
            capsule_meridians: 24,
            capsule_cap_parallels: 6,
        }
    }
}

/// Wireframe capability flag and split-mesh cache size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireframeConfig {
    /// Host cannot draw wireframes directly and needs split-triangle meshes
    pub split_triangles: bool,
    /// Entries kept by the split-mesh cache
    pub cache_capacity: usize,
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            split_triangles: false,
            cache_capacity: 16,
        }
    }
}

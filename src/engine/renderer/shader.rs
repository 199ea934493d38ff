// Shader loading from disk, compilation and uniform discovery

use log::{info, warn};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Name of the projection matrix uniform in the vertex shader
pub const PROJECTION_UNIFORM: &str = "projection";
/// Name of the model matrix uniform in the vertex shader
pub const MODEL_UNIFORM: &str = "model";

/// Shader loading and compilation errors
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("Failed to read shader {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} shader compile error:\n{message}")]
    Compile { stage: ShaderStage, message: String },

    #[error("Shader link error:\n{0}")]
    Link(String),
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point name each stage's source must define
    pub fn entry_point(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

/// Locations of the circle's shader sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// Standard file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex: dir.join("circle_vertex.wgsl"),
            fragment: dir.join("circle_fragment.wgsl"),
        }
    }
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self::in_dir("./shaders")
    }
}

/// WGSL source text for both stages
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Read both stages from disk
    pub fn load(paths: &ShaderPaths) -> Result<Self, ShaderError> {
        let sources = Self {
            vertex: read_source(&paths.vertex)?,
            fragment: read_source(&paths.fragment)?,
        };
        info!(
            "Loaded shaders {} and {}",
            paths.vertex.display(),
            paths.fragment.display()
        );
        Ok(sources)
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Blank out `//` and (nested) `/* */` comments, keeping line breaks
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('/', Some('*')) => {
                chars.next();
                depth += 1;
            }
            ('*', Some('/')) if depth > 0 => {
                chars.next();
                depth -= 1;
            }
            ('/', Some('/')) if depth == 0 => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            ('\n', _) => out.push('\n'),
            _ if depth > 0 => {}
            _ => out.push(c),
        }
    }
    out
}

/// Names of the `var<uniform>` bindings declared in a WGSL source
pub fn declared_uniforms(source: &str) -> Vec<String> {
    const TAG: &str = "var<uniform>";

    let code = strip_comments(source);
    code.match_indices(TAG)
        .filter_map(|(start, _)| {
            let rest = code[start + TAG.len()..].trim_start();
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            (end > 0).then(|| rest[..end].to_string())
        })
        .collect()
}

/// Which of the expected uniforms the vertex shader actually declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UniformSlots {
    pub projection: bool,
    pub model: bool,
}

impl UniformSlots {
    /// Inspect the vertex stage for the projection and model uniforms
    pub fn from_sources(sources: Option<&ShaderSources>) -> Self {
        let declared = sources
            .map(|s| declared_uniforms(&s.vertex))
            .unwrap_or_default();

        let has = |name: &str| declared.iter().any(|d| d == name);
        Self {
            projection: has(PROJECTION_UNIFORM),
            model: has(MODEL_UNIFORM),
        }
    }

    /// Log a warning for every missing uniform; meant to be called once at startup
    pub fn warn_missing(&self) {
        if !self.projection {
            warn!("'{}' uniform not found in shader!", PROJECTION_UNIFORM);
        }
        if !self.model {
            warn!("'{}' uniform not found in shader!", MODEL_UNIFORM);
        }
    }
}

/// Compile one stage, turning validation errors into `ShaderError::Compile`
pub fn compile_module(
    device: &wgpu::Device,
    sources: &ShaderSources,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "Circle Vertex Shader",
            ShaderStage::Fragment => "Circle Fragment Shader",
        }),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(sources.stage(stage))),
    });

    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(ShaderError::Compile {
            stage,
            message: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "
        @group(0) @binding(0) var<uniform> projection: mat4x4<f32>;
        @group(0) @binding(1) var<uniform> model: mat4x4<f32>;
        @vertex fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
            return projection * model * vec4<f32>(p, 1.0);
        }
    ";

    #[test]
    fn test_declared_uniforms() {
        assert_eq!(declared_uniforms(VERTEX), vec!["projection", "model"]);
    }

    #[test]
    fn test_commented_uniform_is_ignored() {
        let source = "// var<uniform> projection: mat4x4<f32>;\n\
                      @group(0) @binding(1) var<uniform> model: mat4x4<f32>;";
        assert_eq!(declared_uniforms(source), vec!["model"]);
    }

    #[test]
    fn test_block_commented_uniform_is_ignored() {
        let source = "/* @group(0) @binding(0)\n\
                      var<uniform> projection: mat4x4<f32>; /* nested */ */\n\
                      @group(0) @binding(1) var<uniform> model: mat4x4<f32>;";
        assert_eq!(declared_uniforms(source), vec!["model"]);

        let slots = UniformSlots::from_sources(Some(&ShaderSources {
            vertex: source.to_string(),
            fragment: String::new(),
        }));
        assert!(!slots.projection);
        assert!(slots.model);
    }

    #[test]
    fn test_uniform_slots() {
        let sources = ShaderSources {
            vertex: "@group(0) @binding(1) var<uniform>model: mat4x4<f32>;".to_string(),
            fragment: String::new(),
        };
        let slots = UniformSlots::from_sources(Some(&sources));

        assert!(!slots.projection);
        assert!(slots.model);
    }

    #[test]
    fn test_uniform_slots_without_sources() {
        assert_eq!(UniformSlots::from_sources(None), UniformSlots::default());
    }

    #[test]
    fn test_default_paths() {
        let paths = ShaderPaths::default();
        assert!(paths.vertex.ends_with("shaders/circle_vertex.wgsl"));
        assert!(paths.fragment.ends_with("shaders/circle_fragment.wgsl"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let paths = ShaderPaths::in_dir("/definitely/not/a/shader/dir");
        let err = ShaderSources::load(&paths).unwrap_err();

        assert!(matches!(err, ShaderError::Read { .. }));
        assert!(err.to_string().contains("circle_vertex.wgsl"));
    }

    #[test]
    fn test_bundled_shaders_declare_both_uniforms() {
        let paths = ShaderPaths::in_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"));
        let sources = ShaderSources::load(&paths).unwrap();
        let slots = UniformSlots::from_sources(Some(&sources));

        assert!(slots.projection);
        assert!(slots.model);
        assert!(sources.vertex.contains(ShaderStage::Vertex.entry_point()));
        assert!(sources.fragment.contains(ShaderStage::Fragment.entry_point()));
    }

    #[test]
    fn test_compile_error_display() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fragment shader compile error:\nunexpected token"
        );
    }
}

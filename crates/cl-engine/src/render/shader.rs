use std::path::Path;

use anyhow::{anyhow, Context, Result};
use naga::valid::{Capabilities, ValidationFlags, Validator};

/// A resource the program declares with `@group(g) @binding(b)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderBinding {
    pub group: u32,
    pub binding: u32,
    /// Size in bytes of the bound type when it is a `var<uniform>`.
    pub uniform_size: Option<u32>,
}

/// Validated WGSL source for a vertex + fragment program.
///
/// The source is parsed and validated when it is created, so a broken file is
/// reported at load time instead of when the first pipeline is built.
/// Programs must define a `@vertex fn vs_main` and a `@fragment fn fs_main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    label: String,
    wgsl: String,
    bindings: Vec<ShaderBinding>,
}

impl ShaderSource {
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    pub const FRAGMENT_ENTRY: &'static str = "fs_main";

    /// Reads and validates a WGSL program from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let wgsl = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read shader {}", path.display()))?;

        let source = Self::from_wgsl(path.display().to_string(), wgsl)
            .with_context(|| format!("invalid shader {}", path.display()))?;

        log::debug!(
            "loaded shader {} ({} bytes, {} bindings)",
            path.display(),
            source.wgsl.len(),
            source.bindings.len()
        );
        Ok(source)
    }

    /// Parses and validates in-memory WGSL. `label` names the source in
    /// diagnostics and GPU debug labels.
    pub fn from_wgsl(label: impl Into<String>, wgsl: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let wgsl = wgsl.into();

        let module = naga::front::wgsl::parse_str(&wgsl)
            .map_err(|e| anyhow!(e.emit_to_string_with_path(&wgsl, &label)))
            .context("WGSL parse error")?;

        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|e| anyhow!(e.emit_to_string_with_path(&wgsl, &label)))
            .context("WGSL validation error")?;

        for (entry, stage) in [
            (Self::VERTEX_ENTRY, naga::ShaderStage::Vertex),
            (Self::FRAGMENT_ENTRY, naga::ShaderStage::Fragment),
        ] {
            anyhow::ensure!(
                module
                    .entry_points
                    .iter()
                    .any(|ep| ep.name == entry && ep.stage == stage),
                "missing {stage:?} entry point `{entry}`"
            );
        }

        let bindings = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                let rb = var.binding.as_ref()?;
                let uniform_size = matches!(var.space, naga::AddressSpace::Uniform)
                    .then(|| module.types[var.ty].inner.try_size(module.to_ctx()))
                    .flatten();
                Some(ShaderBinding {
                    group: rb.group,
                    binding: rb.binding,
                    uniform_size,
                })
            })
            .collect();

        Ok(Self {
            label,
            wgsl,
            bindings,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn wgsl(&self) -> &str {
        &self.wgsl
    }

    /// Resources declared by the program, in declaration order.
    pub fn bindings(&self) -> &[ShaderBinding] {
        &self.bindings
    }

    pub(crate) fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label.as_str()),
            source: wgpu::ShaderSource::Wgsl(self.wgsl.as_str().into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
        @vertex fn vs_main(@builtin(vertex_index) i: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }
        @fragment fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0);
        }
    ";

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cl-engine-{}-{name}", std::process::id()))
    }

    // ── entry points ──────────────────────────────────────────────────────

    #[test]
    fn accepts_program_with_both_entry_points() {
        let s = ShaderSource::from_wgsl("minimal", MINIMAL).unwrap();
        assert_eq!(s.label(), "minimal");
        assert_eq!(s.wgsl(), MINIMAL);
        assert!(s.bindings().is_empty());
    }

    #[test]
    fn rejects_missing_fragment_entry() {
        let src = MINIMAL.replace("fs_main", "frag");
        let err = ShaderSource::from_wgsl("x", src).unwrap_err();
        assert!(format!("{err:#}").contains("fs_main"));
    }

    #[test]
    fn prefix_of_entry_name_does_not_count() {
        let src = MINIMAL.replace("fn vs_main(", "fn vs_main_old(");
        assert!(ShaderSource::from_wgsl("x", src).is_err());
    }

    #[test]
    fn entry_point_with_wrong_stage_is_rejected() {
        let src = MINIMAL.replace("@fragment fn fs_main", "@fragment fn fs_other");
        let src = format!("{src}\nfn fs_main() -> f32 {{ return 1.0; }}\n");
        let err = ShaderSource::from_wgsl("x", src).unwrap_err();
        assert!(format!("{err:#}").contains("Fragment"));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn rejects_type_error_in_fragment_body() {
        let src = MINIMAL.replace("return vec4<f32>(1.0);", "return 1;");
        let err = ShaderSource::from_wgsl("broken.wgsl", src).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("WGSL"), "{msg}");
        assert!(msg.contains("broken.wgsl"), "{msg}");
    }

    #[test]
    fn rejects_syntax_error() {
        let src = MINIMAL.replace("return vec4<f32>(1.0);", "return vec4<f32>(1.0)");
        let err = ShaderSource::from_wgsl("x", src).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }

    #[test]
    fn records_uniform_bindings_with_size() {
        let src = format!(
            "struct Cam {{ a: mat4x4<f32>, b: mat4x4<f32> }}\n\
             @group(0) @binding(0) var<uniform> cam: Cam;\n{}",
            MINIMAL.replace("return vec4<f32>(1.0);", "return cam.a[0] + cam.b[0];")
        );
        let s = ShaderSource::from_wgsl("x", src).unwrap();
        assert_eq!(
            s.bindings(),
            &[ShaderBinding {
                group: 0,
                binding: 0,
                uniform_size: Some(128),
            }]
        );
    }

    // ── files ─────────────────────────────────────────────────────────────

    #[test]
    fn load_reads_file_and_labels_it_with_the_path() {
        let path = temp_path("camera.wgsl");
        std::fs::write(&path, MINIMAL).unwrap();

        let s = ShaderSource::load(&path).unwrap();
        assert_eq!(s.label(), path.display().to_string());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_error_names_the_path() {
        let path = temp_path("does-not-exist.wgsl");
        let err = ShaderSource::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.wgsl"));
    }

    #[test]
    fn load_rejects_invalid_file_contents() {
        let path = temp_path("typo.wgsl");
        std::fs::write(&path, MINIMAL.replace("return vec4<f32>(1.0);", "return 1;")).unwrap();

        let err = ShaderSource::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid shader"));

        std::fs::remove_file(&path).unwrap();
    }
}

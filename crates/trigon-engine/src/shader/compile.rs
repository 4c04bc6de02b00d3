use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::ShaderStage;

/// A parsed and validated WGSL stage.
///
/// The module may declare other entry points; only the first one matching
/// `stage` is used.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: ShaderStage,
    module: naga::Module,
    entry_index: usize,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub fn entry_point(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }

    pub fn entry_name(&self) -> &str {
        &self.entry_point().name
    }
}

/// Compiles one WGSL stage against the baseline capabilities every device has.
///
/// On failure returns the full compiler log; callers cap it with
/// [`cap_log`](super::cap_log) before surfacing it.
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<CompiledStage, String> {
    compile_stage_with(stage, source, Capabilities::default())
}

/// Like [`compile_stage`], validating against `capabilities`.
///
/// Backends pass what their device actually enables, so a stage that needs a
/// missing feature fails here instead of at pipeline creation.
pub fn compile_stage_with(
    stage: ShaderStage,
    source: &str,
    capabilities: Capabilities,
) -> Result<CompiledStage, String> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| e.emit_to_string(source))?;

    Validator::new(ValidationFlags::all(), capabilities)
        .validate(&module)
        .map_err(|e| e.emit_to_string(source))?;

    let entry_index = module
        .entry_points
        .iter()
        .position(|ep| ep.stage == stage.to_naga())
        .ok_or_else(|| format!("no {} entry point found", stage.attribute()))?;

    Ok(CompiledStage {
        stage,
        module,
        entry_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(pos, 1.0);
        }
    "#;

    #[test]
    fn compiles_valid_vertex_stage() {
        let compiled = compile_stage(ShaderStage::Vertex, VERTEX).unwrap();
        assert_eq!(compiled.stage(), ShaderStage::Vertex);
        assert_eq!(compiled.entry_name(), "vs_main");
    }

    #[test]
    fn syntax_error_produces_log() {
        let log = compile_stage(ShaderStage::Vertex, "@vertex fn vs_main( -> {").unwrap_err();
        assert!(!log.trim().is_empty());
    }

    #[test]
    fn type_error_produces_log() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                return vec3<f32>(1.0, 0.5, 0.2);
            }
        "#;
        let log = compile_stage(ShaderStage::Fragment, src).unwrap_err();
        assert!(!log.trim().is_empty());
    }

    const HALF_VERTEX: &str = r#"
        enable f16;

        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            let h: f16 = 1.0h;
            return vec4<f32>(pos, f32(h));
        }
    "#;

    #[test]
    fn half_floats_need_the_capability() {
        assert!(compile_stage(ShaderStage::Vertex, HALF_VERTEX).is_err());

        let caps = Capabilities::default() | Capabilities::SHADER_FLOAT16;
        assert!(compile_stage_with(ShaderStage::Vertex, HALF_VERTEX, caps).is_ok());
    }

    #[test]
    fn missing_entry_point_for_stage() {
        let log = compile_stage(ShaderStage::Fragment, VERTEX).unwrap_err();
        assert_eq!(log, "no @fragment entry point found");
    }
}

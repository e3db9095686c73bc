use std::borrow::Cow;
use std::fmt;

use crate::geometry::POSITION_LOCATION;

use super::error::ShaderError;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Name of the 3D texture uniform the fragment stage samples.
pub const VOLUME_UNIFORM: &str = "uVolume";
pub const VOLUME_SAMPLER_UNIFORM: &str = "uVolumeSampler";

/// Bind group the volume must live in ("texture unit 0").
const VOLUME_GROUP: u32 = 0;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn entry_point(self) -> &'static str {
        match self {
            Stage::Vertex => VERTEX_ENTRY,
            Stage::Fragment => FRAGMENT_ENTRY,
        }
    }

    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            Stage::Vertex => naga::ShaderStage::Vertex,
            Stage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// WGSL text for one stage.
#[derive(Debug, Clone)]
pub struct StageSource {
    pub stage: Stage,
    pub label: &'static str,
    pub wgsl: Cow<'static, str>,
}

impl StageSource {
    pub fn new(stage: Stage, label: &'static str, wgsl: impl Into<Cow<'static, str>>) -> Self {
        Self { stage, label, wgsl: wgsl.into() }
    }

    /// Position passthrough.
    pub fn volume_vertex() -> Self {
        Self::new(Stage::Vertex, "volsample vertex shader", include_str!("volume.vert.wgsl"))
    }

    /// White scaled by the volume sample at the center.
    pub fn volume_fragment() -> Self {
        Self::new(Stage::Fragment, "volsample fragment shader", include_str!("volume.frag.wgsl"))
    }
}

/// A stage that parsed and validated.
#[derive(Debug)]
pub struct CompiledStage {
    pub stage: Stage,
    pub label: &'static str,
    pub wgsl: Cow<'static, str>,
    module: naga::Module,
}

/// Compiles one stage.
///
/// Fails with the compiler's diagnostics when the source does not parse or
/// validate, or lacks the entry point for its stage.
pub fn compile(src: &StageSource) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(&src.wgsl)
        .map_err(|e| ShaderError::compile(src.stage, e.emit_to_string(&src.wgsl)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::compile(src.stage, e.emit_to_string(&src.wgsl)))?;

    let entry = src.stage.entry_point();
    let has_entry = module
        .entry_points
        .iter()
        .any(|ep| ep.name == entry && ep.stage == src.stage.naga_stage());
    if !has_entry {
        return Err(ShaderError::compile(
            src.stage,
            format!("missing @{} entry point `{entry}`", src.stage),
        ));
    }

    log::debug!("compiled {} ({} stage)", src.label, src.stage);

    Ok(CompiledStage {
        stage: src.stage,
        label: src.label,
        wgsl: src.wgsl.clone(),
        module,
    })
}

impl CompiledStage {
    fn entry_point(&self) -> Option<&naga::EntryPoint> {
        let entry = self.stage.entry_point();
        self.module.entry_points.iter().find(|ep| ep.name == entry)
    }

    /// Binding of the named module-scope resource, if it exists and is bound.
    pub fn resource_binding(&self, name: &str) -> Option<naga::ResourceBinding> {
        self.global(name).and_then(|g| g.binding.clone())
    }

    fn global(&self, name: &str) -> Option<&naga::GlobalVariable> {
        self.module
            .global_variables
            .iter()
            .map(|(_, g)| g)
            .find(|g| g.name.as_deref() == Some(name))
    }

    fn global_type(&self, name: &str) -> Option<&naga::TypeInner> {
        self.global(name).map(|g| &self.module.types[g.ty].inner)
    }

    /// Locations of the entry point's `@location` inputs.
    pub fn input_locations(&self) -> Vec<u32> {
        let Some(ep) = self.entry_point() else { return Vec::new() };
        ep.function
            .arguments
            .iter()
            .filter_map(|arg| match arg.binding {
                Some(naga::Binding::Location { location, .. }) => Some(location),
                _ => None,
            })
            .collect()
    }

    /// Type of the entry point input at `location`.
    pub fn input_type(&self, location: u32) -> Option<&naga::TypeInner> {
        let ep = self.entry_point()?;
        ep.function
            .arguments
            .iter()
            .find(|arg| {
                matches!(arg.binding, Some(naga::Binding::Location { location: l, .. }) if l == location)
            })
            .map(|arg| &self.module.types[arg.ty].inner)
    }
}

/// Where the volume texture and its sampler are bound.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VolumeBindings {
    pub group: u32,
    pub texture: u32,
    pub sampler: u32,
}

/// Checks that the two stages agree with each other and with the geometry
/// and volume they will be fed, and resolves the volume bindings.
pub fn link_interface(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
) -> Result<VolumeBindings, ShaderError> {
    if vertex.stage != Stage::Vertex || fragment.stage != Stage::Fragment {
        return Err(ShaderError::link("stages passed in the wrong order"));
    }

    let inputs = vertex.input_locations();
    if inputs != [POSITION_LOCATION] {
        return Err(ShaderError::link(format!(
            "vertex stage must take exactly one input at location {POSITION_LOCATION}, found {inputs:?}"
        )));
    }

    let is_vec3_f32 = matches!(
        vertex.input_type(POSITION_LOCATION),
        Some(naga::TypeInner::Vector { size: naga::VectorSize::Tri, scalar }) if *scalar == naga::Scalar::F32
    );
    if !is_vec3_f32 {
        return Err(ShaderError::link(format!(
            "vertex input at location {POSITION_LOCATION} must be vec3<f32>"
        )));
    }

    let texture = fragment
        .resource_binding(VOLUME_UNIFORM)
        .ok_or_else(|| ShaderError::link(format!("sampler uniform `{VOLUME_UNIFORM}` not found")))?;

    let is_3d = matches!(
        fragment.global_type(VOLUME_UNIFORM),
        Some(naga::TypeInner::Image { dim: naga::ImageDimension::D3, arrayed: false, .. })
    );
    if !is_3d {
        return Err(ShaderError::link(format!("`{VOLUME_UNIFORM}` must be a texture_3d")));
    }

    let sampler = fragment.resource_binding(VOLUME_SAMPLER_UNIFORM).ok_or_else(|| {
        ShaderError::link(format!("sampler `{VOLUME_SAMPLER_UNIFORM}` not found"))
    })?;

    if texture.group != VOLUME_GROUP || sampler.group != VOLUME_GROUP {
        return Err(ShaderError::link(format!(
            "volume resources must be in group {VOLUME_GROUP} (texture in {}, sampler in {})",
            texture.group, sampler.group
        )));
    }

    Ok(VolumeBindings {
        group: VOLUME_GROUP,
        texture: texture.binding,
        sampler: sampler.binding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(src: &'static str) -> StageSource {
        StageSource::new(Stage::Fragment, "test fragment", src)
    }

    #[test]
    fn embedded_stages_compile() {
        let vs = compile(&StageSource::volume_vertex()).unwrap();
        let fs = compile(&StageSource::volume_fragment()).unwrap();
        assert_eq!(vs.stage, Stage::Vertex);
        assert_eq!(fs.stage, Stage::Fragment);
    }

    #[test]
    fn volume_uniform_resolves() {
        let fs = compile(&StageSource::volume_fragment()).unwrap();
        let b = fs.resource_binding(VOLUME_UNIFORM).unwrap();
        assert_eq!((b.group, b.binding), (0, 0));
    }

    #[test]
    fn embedded_stages_link() {
        let vs = compile(&StageSource::volume_vertex()).unwrap();
        let fs = compile(&StageSource::volume_fragment()).unwrap();
        let bindings = link_interface(&vs, &fs).unwrap();
        assert_eq!(bindings, VolumeBindings { group: 0, texture: 0, sampler: 1 });
    }

    #[test]
    fn syntax_error_reports_compiler_log() {
        let err = compile(&fragment("@fragment fn fs_main( -> @location(0) vec4<f32> {}")).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: Stage::Fragment, .. }));
        assert!(!err.log().is_empty());
    }

    #[test]
    fn validation_error_is_a_compile_error() {
        // Returns a vec3 where a vec4 is declared.
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec3<f32>(1.0); }";
        let err = compile(&fragment(src)).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { .. }));
    }

    #[test]
    fn missing_entry_point_is_a_compile_error() {
        let src = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let err = compile(&fragment(src)).unwrap_err();
        assert!(err.log().contains(FRAGMENT_ENTRY));
    }

    #[test]
    fn missing_volume_uniform_fails_link() {
        let vs = compile(&StageSource::volume_vertex()).unwrap();
        let fs = compile(&fragment(
            "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        ))
        .unwrap();

        let err = link_interface(&vs, &fs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(err.log().contains(VOLUME_UNIFORM));
    }

    #[test]
    fn two_dimensional_volume_fails_link() {
        let vs = compile(&StageSource::volume_vertex()).unwrap();
        let fs = compile(&fragment(
            r#"
            @group(0) @binding(0) var uVolume: texture_2d<f32>;
            @group(0) @binding(1) var uVolumeSampler: sampler;
            @fragment fn fs_main() -> @location(0) vec4<f32> {
                return vec4<f32>(textureSample(uVolume, uVolumeSampler, vec2<f32>(0.5)).x);
            }
            "#,
        ))
        .unwrap();

        assert!(matches!(link_interface(&vs, &fs), Err(ShaderError::Link { .. })));
    }

    #[test]
    fn wrong_vertex_input_fails_link() {
        let vs = compile(&StageSource::new(
            Stage::Vertex,
            "test vertex",
            "@vertex fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> { return vec4<f32>(p, 0.0, 1.0); }",
        ))
        .unwrap();
        let fs = compile(&StageSource::volume_fragment()).unwrap();

        assert!(matches!(link_interface(&vs, &fs), Err(ShaderError::Link { .. })));
    }

    #[test]
    fn vertex_takes_one_vec3_input() {
        let vs = compile(&StageSource::volume_vertex()).unwrap();
        assert_eq!(vs.input_locations(), vec![0]);
    }
}

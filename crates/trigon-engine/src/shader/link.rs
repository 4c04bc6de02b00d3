use std::collections::BTreeMap;

use naga::{Binding, Handle, Scalar, TypeInner, VectorSize};

use super::{CompiledStage, ShaderStage};

/// Location of a uniform within a linked program (its binding in group 0).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct UniformLocation(pub u32);

/// A `var<uniform>` declaration visible to a linked program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniformSlot {
    pub name: String,
    pub binding: u32,
    /// Size of the uniform's type in bytes.
    pub size: u32,
}

impl UniformSlot {
    pub fn location(&self) -> UniformLocation {
        UniformLocation(self.binding)
    }
}

/// A per-vertex `f32` input consumed by the vertex stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexInput {
    pub location: u32,
    pub components: u8,
}

/// Resources and inputs of a linked program.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ProgramInterface {
    /// Sorted by location.
    pub vertex_inputs: Vec<VertexInput>,
    /// Sorted by binding.
    pub uniforms: Vec<UniformSlot>,
}

impl ProgramInterface {
    pub fn uniform(&self, name: &str) -> Option<&UniformSlot> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// Index into `uniforms` of the slot at `location`.
    pub fn slot_index(&self, location: UniformLocation) -> Option<usize> {
        self.uniforms.iter().position(|u| u.binding == location.0)
    }
}

/// Links a vertex and a fragment stage into one program interface.
///
/// Every fragment input must be produced by the vertex stage at the same
/// location with the same type. Uniforms declared by both stages are merged by
/// binding. All problems are reported in one log, one per line.
pub fn link_stages(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
) -> Result<ProgramInterface, String> {
    let mut errors = Vec::new();

    if vertex.stage() != ShaderStage::Vertex {
        errors.push(format!("expected a vertex stage, got {}", vertex.stage()));
    }
    if fragment.stage() != ShaderStage::Fragment {
        errors.push(format!("expected a fragment stage, got {}", fragment.stage()));
    }
    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    let outputs = varyings(vertex, Direction::Out);
    for input in varyings(fragment, Direction::In) {
        match outputs.iter().find(|o| o.location == input.location) {
            None => errors.push(format!(
                "fragment input at location {} is not written by the vertex stage",
                input.location
            )),
            Some(output) if output.ty != input.ty => errors.push(format!(
                "location {}: vertex output is {} but fragment input is {}",
                input.location,
                type_name(&output.ty),
                type_name(&input.ty)
            )),
            Some(_) => {}
        }
    }

    let mut vertex_inputs = Vec::new();
    for input in varyings(vertex, Direction::In) {
        match components(&input.ty) {
            Some(components) => vertex_inputs.push(VertexInput {
                location: input.location,
                components,
            }),
            None => errors.push(format!(
                "vertex input at location {} has unsupported type {}; only f32 scalars and vectors are supported",
                input.location,
                type_name(&input.ty)
            )),
        }
    }
    vertex_inputs.sort_by_key(|i| i.location);

    let mut merged: BTreeMap<u32, UniformSlot> = BTreeMap::new();
    for slot in uniforms(vertex, &mut errors)
        .into_iter()
        .chain(uniforms(fragment, &mut errors))
    {
        if let Some(existing) = merged.get(&slot.binding) {
            if existing.name != slot.name || existing.size != slot.size {
                errors.push(format!(
                    "binding {} is declared as `{}` ({} bytes) and `{}` ({} bytes)",
                    slot.binding, existing.name, existing.size, slot.name, slot.size
                ));
            }
            continue;
        }
        if let Some(other) = merged.values().find(|u| u.name == slot.name) {
            errors.push(format!(
                "uniform `{}` is declared at bindings {} and {}",
                slot.name, other.binding, slot.binding
            ));
            continue;
        }
        merged.insert(slot.binding, slot);
    }

    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    Ok(ProgramInterface {
        vertex_inputs,
        uniforms: merged.into_values().collect(),
    })
}

#[derive(Copy, Clone)]
enum Direction {
    In,
    Out,
}

struct Varying {
    location: u32,
    ty: TypeInner,
}

fn varyings(stage: &CompiledStage, direction: Direction) -> Vec<Varying> {
    let module = stage.module();
    let function = &stage.entry_point().function;
    let mut out = Vec::new();

    match direction {
        Direction::In => {
            for arg in &function.arguments {
                collect_located(module, arg.ty, arg.binding.as_ref(), &mut out);
            }
        }
        Direction::Out => {
            if let Some(result) = &function.result {
                collect_located(module, result.ty, result.binding.as_ref(), &mut out);
            }
        }
    }

    out
}

/// Flattens struct members so `@location` fields of an IO struct are found.
fn collect_located(
    module: &naga::Module,
    ty: Handle<naga::Type>,
    binding: Option<&Binding>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(Varying {
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_located(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn uniforms(stage: &CompiledStage, errors: &mut Vec<String>) -> Vec<UniformSlot> {
    let module = stage.module();
    let mut slots = Vec::new();

    for (_, var) in module.global_variables.iter() {
        let name = var.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        match var.space {
            naga::AddressSpace::Uniform => {
                let Some(binding) = &var.binding else { continue };
                if binding.group != 0 {
                    errors.push(format!(
                        "uniform `{name}` is in bind group {}; only group 0 is supported",
                        binding.group
                    ));
                    continue;
                }
                slots.push(UniformSlot {
                    name,
                    binding: binding.binding,
                    size: module.types[var.ty].inner.size(module.to_ctx()),
                });
            }
            naga::AddressSpace::Storage { .. } | naga::AddressSpace::Handle => {
                errors.push(format!(
                    "{} resource `{name}` is not supported; only `var<uniform>` bindings are",
                    stage.stage()
                ));
            }
            _ => {}
        }
    }

    slots
}

fn components(ty: &TypeInner) -> Option<u8> {
    match ty {
        TypeInner::Scalar(scalar) if *scalar == Scalar::F32 => Some(1),
        TypeInner::Vector { size, scalar } if *scalar == Scalar::F32 => Some(match size {
            VectorSize::Bi => 2,
            VectorSize::Tri => 3,
            VectorSize::Quad => 4,
        }),
        _ => None,
    }
}

fn type_name(ty: &TypeInner) -> String {
    let scalar_name = |s: &Scalar| match s.kind {
        naga::ScalarKind::Float => format!("f{}", s.width * 8),
        naga::ScalarKind::Sint => format!("i{}", s.width * 8),
        naga::ScalarKind::Uint => format!("u{}", s.width * 8),
        naga::ScalarKind::Bool => "bool".to_string(),
        _ => format!("{:?}", s.kind),
    };

    match ty {
        TypeInner::Scalar(s) => scalar_name(s),
        TypeInner::Vector { size, scalar } => format!("vec{}<{}>", *size as u8, scalar_name(scalar)),
        other => format!("{other:?}"),
    }
}

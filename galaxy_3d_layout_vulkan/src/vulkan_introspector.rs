/// SPIR-V introspection backed by spirq
///
/// `SpirqIntrospector` turns spirq's per-entry-point variable lists into the
/// resource/decoration/type queries the layout assembler runs. Resource ids
/// are assigned sequentially per reflected entry point.

use galaxy_3d_layout::galaxy3d::layout::{BaseKind, ShaderStage, ShaderStageModule};
use galaxy_3d_layout::galaxy3d::reflect::{
    BufferRange, Decoration, Dimensionality, EntryPointInfo, ResourceFamily, ResourceId,
    ShaderIntrospector, ShaderResource, ShaderResources, StageReflection, TypeShape,
};
use galaxy_3d_layout::galaxy3d::{Error, Result};
use galaxy_3d_layout::engine_debug;
use rustc_hash::FxHashMap;

/// spirq implementation of [`ShaderIntrospector`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SpirqIntrospector;

impl SpirqIntrospector {
    pub fn new() -> Self {
        Self
    }
}

/// Map a SPIR-V execution model to a pipeline stage
fn stage_from_exec_model(model: spirq::spirv::ExecutionModel) -> Option<ShaderStage> {
    use spirq::spirv::ExecutionModel;
    match model {
        ExecutionModel::Vertex => Some(ShaderStage::Vertex),
        ExecutionModel::TessellationControl => Some(ShaderStage::TessellationControl),
        ExecutionModel::TessellationEvaluation => Some(ShaderStage::TessellationEvaluation),
        ExecutionModel::Geometry => Some(ShaderStage::Geometry),
        ExecutionModel::Fragment => Some(ShaderStage::Fragment),
        ExecutionModel::GLCompute => Some(ShaderStage::Compute),
        ExecutionModel::TaskNV | ExecutionModel::TaskEXT => Some(ShaderStage::Task),
        ExecutionModel::MeshNV | ExecutionModel::MeshEXT => Some(ShaderStage::Mesh),
        ExecutionModel::RayGenerationNV => Some(ShaderStage::RayGeneration),
        ExecutionModel::AnyHitNV => Some(ShaderStage::AnyHit),
        ExecutionModel::ClosestHitNV => Some(ShaderStage::ClosestHit),
        ExecutionModel::MissNV => Some(ShaderStage::Miss),
        ExecutionModel::IntersectionNV => Some(ShaderStage::Intersection),
        ExecutionModel::CallableNV => Some(ShaderStage::Callable),
        // Kernel and newer models have no pipeline stage here
        _ => None,
    }
}

fn reflection_failed(e: impl std::fmt::Debug) -> Error {
    Error::ReflectionFailed(format!("SPIR-V reflection failed: {:?}", e))
}

/// Convert a spirq ScalarType to (bit width, base kind)
fn scalar_facts(scalar_ty: &spirq::ty::ScalarType) -> (u32, BaseKind) {
    use spirq::ty::ScalarType;
    match scalar_ty {
        ScalarType::Integer { bits, is_signed: true } => (*bits as u32, BaseKind::SignedInt),
        ScalarType::Integer { bits, is_signed: false } => (*bits as u32, BaseKind::UnsignedInt),
        ScalarType::Float { bits } => (*bits as u32, BaseKind::Float),
        ScalarType::Boolean => (32, BaseKind::Boolean),
        ScalarType::Void => (0, BaseKind::Opaque),
    }
}

/// Shape of a stage input or block member type
fn type_shape(ty: &spirq::ty::Type) -> TypeShape {
    use spirq::ty::Type;
    match ty {
        Type::Scalar(s) => {
            let (bits, kind) = scalar_facts(s);
            TypeShape::vector(bits, kind, 1)
        }
        Type::Vector(v) => {
            let (bits, kind) = scalar_facts(&v.scalar_ty);
            TypeShape::vector(bits, kind, v.nscalar as u32)
        }
        Type::Matrix(m) => {
            let (bits, kind) = scalar_facts(&m.vector_ty.scalar_ty);
            let mut shape = TypeShape::vector(bits, kind, m.vector_ty.nscalar as u32);
            shape.columns = m.nvector as u32;
            shape
        }
        Type::Array(a) => {
            let mut shape = type_shape(&a.element_ty);
            shape.array_dims.insert(0, a.nelement.map(|n| n as u32).unwrap_or(1));
            shape
        }
        Type::Struct(_) => TypeShape {
            base_kind: BaseKind::Struct,
            ..TypeShape::opaque(Dimensionality::None)
        },
        _ => TypeShape::opaque(Dimensionality::None),
    }
}

/// Family and dimensionality of a spirq descriptor type
fn descriptor_family(desc_ty: &spirq::ty::DescriptorType) -> (ResourceFamily, Dimensionality) {
    use spirq::ty::DescriptorType;
    match desc_ty {
        DescriptorType::UniformBuffer() => (ResourceFamily::UniformBuffer, Dimensionality::None),
        DescriptorType::StorageBuffer(..) => (ResourceFamily::StorageBuffer, Dimensionality::None),
        DescriptorType::StorageImage(..) => (ResourceFamily::StorageImage, Dimensionality::Image),
        DescriptorType::StorageTexelBuffer(..) => (ResourceFamily::StorageImage, Dimensionality::Buffer),
        DescriptorType::SampledImage() => (ResourceFamily::SeparateImage, Dimensionality::Image),
        DescriptorType::CombinedImageSampler() => (ResourceFamily::SampledImage, Dimensionality::Image),
        DescriptorType::UniformTexelBuffer() => (ResourceFamily::SampledImage, Dimensionality::Buffer),
        DescriptorType::Sampler() => (ResourceFamily::SeparateSampler, Dimensionality::None),
        DescriptorType::InputAttachment(..) => (ResourceFamily::SubpassInput, Dimensionality::SubpassData),
        DescriptorType::AccelStruct() => (ResourceFamily::AccelerationStructure, Dimensionality::None),
    }
}

/// Byte span read from a push constant block: first member offset to end of last member
fn push_constant_span(ty: &spirq::ty::Type) -> Vec<BufferRange> {
    if let spirq::ty::Type::Struct(st) = ty {
        let mut begin: Option<usize> = None;
        let mut end = 0usize;
        for member in &st.members {
            if let (Some(offset), Some(size)) = (member.offset, member.ty.nbyte()) {
                begin = Some(begin.map_or(offset, |b| b.min(offset)));
                end = end.max(offset + size);
            }
        }
        if let Some(begin) = begin {
            return vec![BufferRange {
                offset: begin as u32,
                size: (end - begin) as u32,
            }];
        }
    }
    ty.nbyte()
        .map(|size| vec![BufferRange { offset: 0, size: size as u32 }])
        .unwrap_or_default()
}

impl ShaderIntrospector for SpirqIntrospector {
    fn entry_points(&self, code: &[u32]) -> Result<Vec<EntryPointInfo>> {
        let entry_points = spirq::ReflectConfig::new()
            .spv(code)
            .ref_all_rscs(true)
            .reflect()
            .map_err(reflection_failed)?;

        Ok(entry_points
            .iter()
            .filter_map(|ep| {
                stage_from_exec_model(ep.exec_model).map(|stage| EntryPointInfo {
                    name: ep.name.clone(),
                    stage,
                })
            })
            .collect())
    }

    fn reflect(&self, module: &ShaderStageModule<'_>) -> Result<Box<dyn StageReflection>> {
        let entry_points = spirq::ReflectConfig::new()
            .spv(module.code)
            .ref_all_rscs(true)
            .reflect()
            .map_err(reflection_failed)?;

        let entry_point = entry_points
            .iter()
            .find(|ep| {
                ep.name == module.entry_point && stage_from_exec_model(ep.exec_model) == Some(module.stage)
            })
            .ok_or_else(|| Error::EntryPointNotFound {
                entry_point: module.entry_point.clone(),
                stage: module.stage,
            })?;

        let mut reflection = SpirqStageReflection::default();
        for var in entry_point.vars.iter() {
            match var {
                spirq::var::Variable::Descriptor { name, desc_bind, desc_ty, nbind, .. } => {
                    let (family, dim) = descriptor_family(desc_ty);
                    let mut shape = TypeShape::opaque(dim);
                    if *nbind > 1 {
                        shape.array_dims.push(*nbind);
                    }
                    let id = reflection.push(family, name.as_deref(), shape);
                    reflection.decorations.insert((id, Decoration::DescriptorSet), desc_bind.set());
                    reflection.decorations.insert((id, Decoration::Binding), desc_bind.bind());
                }
                spirq::var::Variable::Input { name, location, ty } => {
                    let id = reflection.push(ResourceFamily::StageInput, name.as_deref(), type_shape(ty));
                    reflection.decorations.insert((id, Decoration::Location), location.loc());
                    // One vertex buffer per attribute
                    reflection.decorations.insert((id, Decoration::Binding), location.loc());
                }
                spirq::var::Variable::PushConstant { name, ty } => {
                    let id = reflection.push(ResourceFamily::PushConstantBuffer, name.as_deref(), type_shape(ty));
                    reflection.ranges.insert(id, push_constant_span(ty));
                }
                _ => {}
            }
        }

        engine_debug!(
            "galaxy3d::vulkan",
            "spirq reflected '{}' ({}): {} variables",
            module.entry_point,
            module.stage,
            entry_point.vars.len()
        );

        Ok(Box::new(reflection))
    }
}

/// Reflected facts of one entry point
#[derive(Debug, Default, Clone)]
pub struct SpirqStageReflection {
    resources: ShaderResources,
    decorations: FxHashMap<(ResourceId, Decoration), u32>,
    shapes: FxHashMap<ResourceId, TypeShape>,
    ranges: FxHashMap<ResourceId, Vec<BufferRange>>,
}

impl SpirqStageReflection {
    fn push(&mut self, family: ResourceFamily, name: Option<&str>, shape: TypeShape) -> ResourceId {
        let id = self.shapes.len() as ResourceId;
        self.shapes.insert(id, shape);

        let resource = ShaderResource::new(id, name.unwrap_or_default());
        let list = match family {
            ResourceFamily::UniformBuffer => &mut self.resources.uniform_buffers,
            ResourceFamily::StorageBuffer => &mut self.resources.storage_buffers,
            ResourceFamily::StorageImage => &mut self.resources.storage_images,
            ResourceFamily::SeparateImage => &mut self.resources.separate_images,
            ResourceFamily::SampledImage => &mut self.resources.sampled_images,
            ResourceFamily::SeparateSampler => &mut self.resources.separate_samplers,
            ResourceFamily::SubpassInput => &mut self.resources.subpass_inputs,
            ResourceFamily::StageInput => &mut self.resources.stage_inputs,
            ResourceFamily::PushConstantBuffer => &mut self.resources.push_constant_buffers,
            ResourceFamily::AccelerationStructure => &mut self.resources.acceleration_structures,
        };
        list.push(resource);
        id
    }
}

impl StageReflection for SpirqStageReflection {
    fn resources(&self) -> &ShaderResources {
        &self.resources
    }

    fn decoration(&self, id: ResourceId, decoration: Decoration) -> Result<u32> {
        self.decorations
            .get(&(id, decoration))
            .copied()
            .ok_or_else(|| Error::ReflectionFailed(format!("resource {} has no {:?} decoration", id, decoration)))
    }

    fn type_shape(&self, id: ResourceId) -> Result<TypeShape> {
        self.shapes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::ReflectionFailed(format!("unknown resource id {}", id)))
    }

    fn active_ranges(&self, id: ResourceId) -> Result<Vec<BufferRange>> {
        Ok(self.ranges.get(&id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "vulkan_introspector_tests.rs"]
mod tests;

//! Uniform blocks shared with the WGSL shaders. Field order and padding must
//! match the `Frame`, `Points`, `Material` and `Object` structs there.

use demo_core::{MapSlot, MeshMaterial, PerspectiveCamera, PointsMaterial, Shading, Transform};
use glam::{Mat3, Mat4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    // physical width, physical height, pixel ratio, elapsed seconds
    viewport: [f32; 4],
    // average radiance (rgb), environment mip count (0 until loaded)
    environment: [f32; 4],
}

/// What the shaders know about the loaded environment map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct EnvironmentInfo {
    pub(crate) average: [f32; 3],
    pub(crate) mip_count: u32,
}

impl FrameUniforms {
    pub(crate) fn new(
        camera: &PerspectiveCamera,
        physical_size: (u32, u32),
        pixel_ratio: f64,
        elapsed: f32,
        environment: EnvironmentInfo,
    ) -> Self {
        let view = camera.view_matrix();
        let view_proj = camera.view_projection();
        let [r, g, b] = environment.average;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            eye: camera.position.extend(1.0).to_array(),
            viewport: [
                physical_size.0 as f32,
                physical_size.1 as f32,
                pixel_ratio as f32,
                elapsed,
            ],
            environment: [r, g, b, environment.mip_count as f32],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointsUniforms {
    size: f32,
    attenuate: f32,
    vertex_colors: f32,
    _pad: f32,
}

impl From<&PointsMaterial> for PointsUniforms {
    fn from(material: &PointsMaterial) -> Self {
        Self {
            size: material.size,
            attenuate: flag(material.size_attenuation),
            vertex_colors: flag(material.vertex_colors),
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MaterialUniforms {
    color: [f32; 4],
    // metalness, roughness, ao intensity, physical shading
    pbr: [f32; 4],
    // normal scale xy, normal map bound
    normal: [f32; 4],
    uv_cols: [[f32; 4]; 3],
}

impl MaterialUniforms {
    pub(crate) fn new(material: &MeshMaterial, uv_transform: Mat3) -> Self {
        let c = material.color;
        let col = |v: glam::Vec3| [v.x, v.y, v.z, 0.0];
        Self {
            color: [c.r, c.g, c.b, material.opacity],
            pbr: [
                material.metalness,
                material.roughness,
                material.ao_map_intensity,
                flag(material.shading == Shading::Physical),
            ],
            normal: [
                material.normal_scale[0],
                material.normal_scale[1],
                flag(material.has_map(MapSlot::Normal)),
                0.0,
            ],
            uv_cols: [
                col(uv_transform.x_axis),
                col(uv_transform.y_axis),
                col(uv_transform.z_axis),
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
}

impl From<&Transform> for ObjectUniforms {
    fn from(transform: &Transform) -> Self {
        let model = transform.matrix();
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: Mat4::from_mat3(normal).to_cols_array_2d(),
        }
    }
}

#[inline]
fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec3, Vec4};

    #[test]
    fn layouts_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 240);
        assert_eq!(std::mem::size_of::<PointsUniforms>(), 16);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 96);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 128);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let transform = Transform {
            scale: Vec3::new(2.0, 1.0, 1.0),
            ..Transform::default()
        };
        let u = ObjectUniforms::from(&transform);
        let n = Mat4::from_cols_array_2d(&u.normal_matrix);
        let v = n * Vec4::new(1.0, 1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.5);
        assert_relative_eq!(v.y, 1.0);
    }

    #[test]
    fn door_material_flags_normal_map_and_physical_shading() {
        let u = MaterialUniforms::new(&MeshMaterial::door_physical(), Mat3::IDENTITY);
        assert_eq!(u.pbr, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(u.normal, [0.5, 0.5, 1.0, 0.0]);
        let basic = MaterialUniforms::new(&MeshMaterial::basic(), Mat3::IDENTITY);
        assert_eq!(basic.pbr[3], 0.0);
        assert_eq!(basic.normal[2], 0.0);
    }

    #[test]
    fn frame_carries_environment_mip_count() {
        let camera = PerspectiveCamera::with_defaults(1.5, Vec3::new(3.0, 3.0, 3.0));
        let env = EnvironmentInfo {
            average: [0.2, 0.3, 0.4],
            mip_count: 12,
        };
        let u = FrameUniforms::new(&camera, (1600, 1200), 2.0, 4.5, env);
        assert_eq!(u.viewport, [1600.0, 1200.0, 2.0, 4.5]);
        assert_eq!(u.environment, [0.2, 0.3, 0.4, 12.0]);
        assert_eq!(u.eye, [3.0, 3.0, 3.0, 1.0]);
    }
}

//! Core rendering engine.
//!
//! The [`Engine`] struct owns every piece of renderer state — mesh, camera,
//! light, texture, projection, framebuffers, render mode, toggles — instead
//! of the scattered global state an earlier design might use. Call
//! [`Engine::update`] once per frame to transform and clip the mesh into
//! screen-space triangles, then [`Engine::render`] to rasterize them.

use crate::camera::Camera;
use crate::clipping::{ClipPolygon, ClipVertex};
use crate::colors::{self, Color};
use crate::light::DirectionalLight;
use crate::mesh::{LoadError, Mesh};
use crate::prelude::{Mat4, Vec3, Vec4};
use crate::projection::{Projection, ProjectionMode};
use crate::render::{Fill, Rasterizer, RasterizerDispatcher, Renderer, ScreenVertex, Triangle};

pub use crate::render::RasterizerType;
use crate::texture::Texture;

/// Six render-mode presets, selected directly by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Wireframe only (key: 1)
    Wire,
    /// Wireframe + vertices (key: 2)
    WireVertex,
    /// Filled, flat-shaded (key: 3)
    #[default]
    Solid,
    /// Filled + wireframe (key: 4)
    SolidWire,
    /// Textured (key: 5)
    Textured,
    /// Textured + wireframe (key: 6)
    TexturedWire,
}

impl RenderMode {
    fn draws_fill(self) -> bool {
        !matches!(self, RenderMode::Wire | RenderMode::WireVertex)
    }

    fn draws_wireframe(self) -> bool {
        matches!(
            self,
            RenderMode::Wire | RenderMode::WireVertex | RenderMode::SolidWire | RenderMode::TexturedWire
        )
    }

    fn draws_vertices(self) -> bool {
        matches!(self, RenderMode::WireVertex)
    }

    fn is_textured(self) -> bool {
        matches!(self, RenderMode::Textured | RenderMode::TexturedWire)
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Wire => write!(f, "Wire"),
            RenderMode::WireVertex => write!(f, "WireVertex"),
            RenderMode::Solid => write!(f, "Solid"),
            RenderMode::SolidWire => write!(f, "SolidWire"),
            RenderMode::Textured => write!(f, "Textured"),
            RenderMode::TexturedWire => write!(f, "TexturedWire"),
        }
    }
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: RasterizerDispatcher,
    triangles_to_render: Vec<Triangle>,
    mesh: Mesh,
    camera: Camera,
    projection: Projection,
    render_mode: RenderMode,
    texture: Option<Texture>,
    light: DirectionalLight,
    pub backface_culling: bool,
    pub draw_grid: bool,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let fov: f32 = 45.0_f32.to_radians();
        let aspect_ratio = width as f32 / height as f32;
        let z_near = 0.1;
        let z_far = 100.0;

        Self {
            renderer: Renderer::new(width, height),
            rasterizer: RasterizerDispatcher::new(RasterizerType::default()),
            triangles_to_render: Vec::new(),
            mesh: Mesh::cube(),
            camera: Camera::new(Vec3::ZERO, 5.0),
            projection: Projection::new(fov, aspect_ratio, z_near, z_far),
            texture: None,
            render_mode: RenderMode::default(),
            light: DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0)),
            backface_culling: true,
            draw_grid: true,
        }
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection.set_mode(mode);
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection.mode()
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    pub fn load_mesh(&mut self, file_path: &str) -> Result<(), LoadError> {
        self.mesh = Mesh::from_obj(file_path)?;
        log::info!("loaded mesh from {file_path}");
        Ok(())
    }

    pub fn load_texture(&mut self, file_path: &str) -> Result<(), image::ImageError> {
        self.texture = Some(Texture::from_file(file_path)?);
        log::info!("loaded texture from {file_path}");
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.projection.set_aspect_ratio(width as f32 / height as f32);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_light_direction(&mut self, direction: Vec3) {
        self.light = DirectionalLight::new(direction);
    }

    pub fn light_direction(&self) -> Vec3 {
        self.light.direction
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Transforms and clips the mesh into screen-space triangles, ready for
    /// [`Engine::render`]. Runs the full pipeline once per frame: world,
    /// view, backface cull, clip (in view space), project, perspective
    /// divide, viewport map.
    pub fn update(&mut self) {
        let faces = self.mesh.faces().to_vec();
        let vertices = self.mesh.vertices().to_vec();
        let rotation = self.mesh.rotation();
        let translation = self.mesh.translation();
        let scale = self.mesh.scale();
        let buffer_width = self.renderer.width();
        let buffer_height = self.renderer.height();
        let view_matrix = self.camera.view_matrix();
        let projection_matrix = self.projection.matrix();
        let frustum = self.projection.frustum();
        let backface_culling = self.backface_culling;
        let textured = self.render_mode.is_textured() && self.texture.is_some();

        let world_matrix = Mat4::translation(translation.x, translation.y, translation.z)
            * Mat4::rotation_z(rotation.z)
            * Mat4::rotation_y(rotation.y)
            * Mat4::rotation_x(rotation.x)
            * Mat4::scaling(scale.x, scale.y, scale.z);

        let mut triangles = Vec::new();

        for face in faces.iter() {
            let world_positions = [
                world_matrix * vertices[face.a as usize - 1],
                world_matrix * vertices[face.b as usize - 1],
                world_matrix * vertices[face.c as usize - 1],
            ];

            let view_positions = [
                view_matrix * world_positions[0],
                view_matrix * world_positions[1],
                view_matrix * world_positions[2],
            ];

            let ab = view_positions[1] - view_positions[0];
            let ac = view_positions[2] - view_positions[0];
            let face_normal = ab.cross(ac);

            if backface_culling {
                // Camera sits at the view-space origin, so the ray toward it
                // from any point on the face is simply `-view_positions[0]`.
                if face_normal.dot(-view_positions[0]) < 0.0 {
                    continue;
                }
            }

            let base_color = if textured {
                Color::rgb(255, 255, 255)
            } else {
                face.color
            };
            let intensity = self.light.intensity(face_normal.normalize());
            let lit_color = base_color.scale_intensity(intensity);

            let clip_vertices = [
                ClipVertex::new(view_positions[0], face.uvs[0], lit_color),
                ClipVertex::new(view_positions[1], face.uvs[1], lit_color),
                ClipVertex::new(view_positions[2], face.uvs[2], lit_color),
            ];

            let polygon =
                ClipPolygon::from_triangle(clip_vertices[0], clip_vertices[1], clip_vertices[2]);
            let clipped = frustum.clip_polygon(polygon);

            if clipped.is_empty() {
                continue;
            }

            for (v0, v1, v2) in clipped.triangulate() {
                if let Some(triangle) =
                    project_triangle(v0, v1, v2, &projection_matrix, buffer_width, buffer_height)
                {
                    triangles.push(Triangle::new(
                        triangle,
                        if textured { Fill::Textured } else { Fill::Solid },
                    ));
                } else {
                    log::debug!("discarded triangle with non-positive clip-space w");
                }
            }
        }

        self.triangles_to_render = triangles;
    }

    /// Render the current frame.
    pub fn render(&mut self) {
        self.renderer.clear(colors::BACKGROUND.to_argb());
        self.renderer.clear_depth();

        if self.draw_grid {
            self.renderer.draw_grid(50, colors::GRID.to_argb());
        }

        let mode = self.render_mode;

        if mode.draws_fill() {
            let mut fb = self.renderer.as_framebuffer();
            for triangle in &self.triangles_to_render {
                self.rasterizer
                    .fill_triangle(triangle, &mut fb, self.texture.as_ref());
            }
        }

        for triangle in &self.triangles_to_render {
            if mode.draws_wireframe() {
                self.renderer
                    .draw_triangle_wireframe(triangle, colors::WIREFRAME.to_argb());
            }
            if mode.draws_vertices() {
                for (x, y, _z) in triangle.points() {
                    self.renderer
                        .draw_rect(x as i32, y as i32, 4, 4, colors::VERTEX.to_argb());
                }
            }
        }
    }
}

/// Projects three clipped view-space vertices to screen space, returning
/// `None` if any vertex has non-positive clip-space `w` (meaning it lies at
/// or behind the eye — should not occur after near-plane clipping, but
/// checked defensively per the fatal-vs-discard error policy).
fn project_triangle(
    v0: &ClipVertex,
    v1: &ClipVertex,
    v2: &ClipVertex,
    projection_matrix: &Mat4,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<[ScreenVertex; 3]> {
    let mut out = Vec::with_capacity(3);
    for v in [v0, v1, v2] {
        out.push(project_vertex(v, projection_matrix, buffer_width, buffer_height)?);
    }
    Some([out[0], out[1], out[2]])
}

fn project_vertex(
    v: &ClipVertex,
    projection_matrix: &Mat4,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<ScreenVertex> {
    let clip = *projection_matrix * Vec4::new(v.position.x, v.position.y, v.position.z, 1.0);

    if clip.w <= 0.0 {
        return None;
    }

    let inv_w = 1.0 / clip.w;
    let ndc_x = clip.x * inv_w;
    let ndc_y = clip.y * inv_w;
    let ndc_z = clip.z * inv_w;

    let screen_x = (ndc_x + 1.0) * 0.5 * buffer_width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * buffer_height as f32;

    Some(ScreenVertex::new(
        screen_x,
        screen_y,
        ndc_z.clamp(0.0, 1.0),
        inv_w,
        v.texcoord,
        v.color,
    ))
}

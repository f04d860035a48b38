use glam::{Mat4, Vec3};

/// Euler-angle camera. Holds its basis vectors; nothing in the frame loop
/// moves it.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
}

impl Camera {
    pub const DEFAULT_YAW: f32 = -90.0;
    pub const DEFAULT_PITCH: f32 = 0.0;
    pub const DEFAULT_SPEED: f32 = 3.0;
    pub const DEFAULT_SENSITIVITY: f32 = 0.25;
    pub const DEFAULT_ZOOM: f32 = 45.0;

    pub fn new() -> Self {
        Self::with_orientation(Vec3::ZERO, Vec3::Y, Self::DEFAULT_YAW, Self::DEFAULT_PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            movement_speed: Self::DEFAULT_SPEED,
            mouse_sensitivity: Self::DEFAULT_SENSITIVITY,
            zoom: Self::DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn update_vectors(&mut self) {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(cy * cp, sp, sy * cp).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

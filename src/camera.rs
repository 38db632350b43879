use glam::{Mat4, Vec3};

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    #[allow(dead_code)]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.eye.distance(point)
    }
}

/// Scripted stand-in for an interactive orbit control: a slow sweep around
/// the target plus a dolly oscillation between the distance limits, so a
/// headless run still crosses every LOD band.
pub struct OrbitController {
    pub azimuth: f32,
    pub polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    pub dolly_period: f32,
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            azimuth: 0.0,
            polar: 1.0,
            min_distance: 1.0,
            max_distance: 100.0,
            min_polar: 0.5,
            max_polar: 1.5,
            rotate_speed: 0.25,
            dolly_period: 12.0,
        }
    }

    pub fn update(&mut self, camera: &mut Camera, dt: f32, elapsed: f32) {
        self.azimuth += self.rotate_speed * dt;

        let phase = (elapsed / self.dolly_period * std::f32::consts::TAU).sin() * 0.5 + 0.5;
        let distance = self.min_distance + (self.max_distance - self.min_distance) * phase;
        let polar = self.polar.clamp(self.min_polar, self.max_polar);

        let direction = Vec3::new(
            polar.sin() * self.azimuth.cos(),
            polar.cos(),
            polar.sin() * self.azimuth.sin(),
        );
        camera.eye = camera.target + direction * distance;
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

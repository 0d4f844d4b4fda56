use glam::{Mat4, Vec2, Vec3, Vec4};
use shared::Zone;

use super::picking::Ray;

/// Animation progress gained per second
const FOCUS_SPEED: f32 = 2.0;
/// Fraction of the remaining distance covered per tick at full ease
const FOCUS_LERP: f32 = 0.1;
/// Eye distance at which a focus animation counts as finished
const FOCUS_EPSILON: f32 = 0.01;

/// Eye and look-at target used to frame a zone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneView {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Camera framing for each zone
pub fn zone_view(zone: Zone) -> ZoneView {
    match zone {
        Zone::Front => ZoneView { eye: Vec3::new(0.0, 0.0, 5.0), target: Vec3::ZERO },
        Zone::Back => ZoneView { eye: Vec3::new(0.0, 0.0, -5.0), target: Vec3::ZERO },
        Zone::LeftSleeve => ZoneView {
            eye: Vec3::new(-5.0, 0.5, 0.0),
            target: Vec3::new(0.0, 0.5, 0.0),
        },
        Zone::RightSleeve => ZoneView {
            eye: Vec3::new(5.0, 0.5, 0.0),
            target: Vec3::new(0.0, 0.5, 0.0),
        },
    }
}

/// Pixel rectangle the model is drawn into
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
    pub min: Vec2,
    pub size: Vec2,
}

impl ViewportRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn aspect(&self) -> f32 {
        self.size.x / self.size.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.min + self.size;
        p.x >= self.min.x && p.y >= self.min.y && p.x <= max.x && p.y <= max.y
    }
}

/// Camera that flies between zone framings
pub struct ZoneCamera {
    pub eye: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    goal: ZoneView,
    progress: f32,
    animating: bool,
    focused_once: bool,
}

impl Default for ZoneCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneCamera {
    pub fn new() -> Self {
        let view = zone_view(Zone::Front);
        Self {
            eye: view.eye,
            look_at: view.target,
            fov: 45.0_f32.to_radians(),
            goal: view,
            progress: 0.0,
            animating: false,
            focused_once: false,
        }
    }

    /// Frame a zone. The first call snaps, later calls start an animation.
    pub fn focus(&mut self, zone: Zone) {
        self.goal = zone_view(zone);
        if !self.focused_once {
            self.eye = self.goal.eye;
            self.look_at = self.goal.target;
            self.focused_once = true;
            self.animating = false;
        } else {
            self.progress = 0.0;
            self.animating = true;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advance the focus animation by `delta` seconds.
    /// Returns true on the tick the animation completes.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.animating {
            return false;
        }

        self.progress += delta * FOCUS_SPEED;
        let t = self.progress.min(1.0);
        // Ease out cubic
        let eased = 1.0 - (1.0 - t).powi(3);

        self.eye = self.eye.lerp(self.goal.eye, eased * FOCUS_LERP);
        self.look_at = self.look_at.lerp(self.goal.target, eased * FOCUS_LERP);

        if self.eye.distance(self.goal.eye) < FOCUS_EPSILON {
            self.animating = false;
            return true;
        }
        false
    }

    /// View matrix (model -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.1, 100.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a 3D point to screen coords
    pub fn project(&self, point: Vec3, rect: ViewportRect) -> Option<Vec2> {
        let p = self.view_projection(rect.aspect()) * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(Vec2::new(
            rect.center().x + ndc.x * rect.size.x * 0.5,
            rect.center().y - ndc.y * rect.size.y * 0.5,
        ))
    }

    /// Cast a ray from a screen position into the scene
    pub fn screen_ray(&self, screen_pos: Vec2, rect: ViewportRect) -> Ray {
        // Screen → NDC
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.size.x * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.size.y * 0.5);

        let vp_inv = self.view_projection(rect.aspect()).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray::new(self.eye, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_focus_snaps() {
        let mut cam = ZoneCamera::new();
        cam.focus(Zone::LeftSleeve);
        assert_eq!(cam.eye, Vec3::new(-5.0, 0.5, 0.0));
        assert!(!cam.is_animating());
    }

    #[test]
    fn test_focus_animation_completes() {
        let mut cam = ZoneCamera::new();
        cam.focus(Zone::Front);
        cam.focus(Zone::Back);
        assert!(cam.is_animating());

        let mut finished = false;
        for _ in 0..2000 {
            if cam.tick(1.0 / 60.0) {
                finished = true;
                break;
            }
        }
        assert!(finished);
        assert!(cam.eye.distance(Vec3::new(0.0, 0.0, -5.0)) < 0.01);
        assert!(!cam.tick(1.0 / 60.0));
    }

    #[test]
    fn test_screen_ray_through_center_hits_target() {
        let cam = ZoneCamera::new();
        let rect = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
        let ray = cam.screen_ray(rect.center(), rect);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_project_unproject_agree() {
        let cam = ZoneCamera::new();
        let rect = ViewportRect::new(0.0, 0.0, 800.0, 600.0);
        let point = Vec3::new(0.3, -0.2, 0.33);
        let screen = cam.project(point, rect).unwrap();
        assert!(rect.contains(screen));
        let ray = cam.screen_ray(screen, rect);
        // Ray passes through the original point
        let t = (point - ray.origin).dot(ray.direction);
        assert!(ray.at(t).distance(point) < 1e-3);
    }
}

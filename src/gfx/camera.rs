use glam::{Mat4, Vec2, Vec3};

pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 30.0;
pub const FOV_MAX: f32 = 120.0;

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec3,
    front: Vec3,
    up: Vec3,
    pitch: f32,
    yaw: f32,
    fov: f32,

    speed: f32,
    sensitivity: f32,
    // Cursor reference for mouse look; `None` until the first move is seen
    last_cursor: Option<Vec2>,

    mtx: Mat4,
    dirty: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Creation Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera three units back from the origin looking down -Z.
    pub fn new() -> Self {
        let mut camera = Self {
            pos: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            pitch: 0.0f32,
            yaw: -90.0f32,
            fov: 90.0f32,

            speed: 25.5f32,
            sensitivity: 0.1f32,
            last_cursor: None,

            mtx: Mat4::IDENTITY,
            dirty: true,
        };
        camera.update_front();
        camera
    }

    #[cfg(test)]
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
        self
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Usability Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn move_forward(&mut self, amount: f32) {
        self.pos += amount * self.front;
        self.dirty = true;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.pos -= amount * self.front;
        self.dirty = true;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.pos += self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.pos -= self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    /// Turns by the given angles in degrees; pitch stays within the limits.
    pub fn turn(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_front();
    }

    /// Distance covered by one movement step over `dt` seconds.
    pub fn step(&self, dt: f32) -> f32 {
        self.speed * dt
    }

    /// Mouse look from an absolute cursor position. The first position only
    /// becomes the reference; every later one turns the camera by its delta.
    pub fn look_at_cursor(&mut self, cursor: Vec2) {
        let last = *self.last_cursor.get_or_insert(cursor);
        self.last_cursor = Some(cursor);

        // Screen y grows downwards
        let offset = Vec2::new(cursor.x - last.x, last.y - cursor.y) * self.sensitivity;
        if offset == Vec2::ZERO {
            return;
        }

        self.turn(offset.x, offset.y);
    }

    /// Scroll up narrows the view.
    pub fn zoom(&mut self, lines: f32) {
        self.fov = (self.fov - lines).clamp(FOV_MIN, FOV_MAX);
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Get / Set Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    pub fn get_mtx(&mut self) -> Mat4 {
        if self.dirty {
            self.calc_mtx();
        }

        self.mtx
    }

    pub fn get_projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, Z_NEAR, Z_FAR)
    }
}

#[cfg(test)]
impl Camera {
    pub fn get_pos(&self) -> Vec3 {
        self.pos
    }

    pub fn get_front(&self) -> Vec3 {
        self.front
    }

    pub fn get_yaw(&self) -> f32 {
        self.yaw
    }

    pub fn get_pitch(&self) -> f32 {
        self.pitch
    }

    pub fn get_fov(&self) -> f32 {
        self.fov
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Internal Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    fn update_front(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.dirty = true;
    }

    fn calc_mtx(&mut self) {
        self.mtx = Mat4::look_at_rh(self.pos, self.pos + self.front, self.up);

        self.dirty = false;
    }
}

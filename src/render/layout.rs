use image::GrayImage;
use rand::Rng;

// Distance between successive spiral turns, in pixels
const TURN_SPACING: f32 = 4.0;
// Arc length travelled per spiral step, in pixels
const ARC_STEP: f32 = 3.0;

/// Pixel occupancy of the canvas with a summed-area table for O(1) box queries
pub struct OccupancyMap {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    integral: Vec<u32>,
}

impl OccupancyMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            integral: vec![0; (width as usize + 1) * (height as usize + 1)],
        }
    }

    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// True when the `w` x `h` box at (`x`, `y`) lies on the canvas and covers no
    /// occupied pixel.
    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x + w > self.width || y + h > self.height {
            return false;
        }
        let covered = (self.integral_at(x + w, y + h) + self.integral_at(x, y))
            - (self.integral_at(x + w, y) + self.integral_at(x, y + h));
        covered == 0
    }

    /// Mark every pixel `mask` covers, with its top-left corner at (`x`, `y`)
    pub fn occupy(&mut self, x: u32, y: u32, mask: &GrayImage) {
        for (mx, my, pixel) in mask.enumerate_pixels() {
            let (cx, cy) = (x + mx, y + my);
            if pixel.0[0] > 0 && cx < self.width && cy < self.height {
                self.cells[cy as usize * self.width as usize + cx as usize] = true;
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let stride = self.width as usize + 1;
        for y in 0..self.height as usize {
            let mut row_sum = 0;
            for x in 0..self.width as usize {
                row_sum += self.cells[y * self.width as usize + x] as u32;
                self.integral[(y + 1) * stride + x + 1] = self.integral[y * stride + x + 1] + row_sum;
            }
        }
    }

    /// Walk an elliptical Archimedean spiral out from a jittered canvas centre and
    /// return the top-left corner of the first free `w` x `h` box.
    pub fn find_position<R: Rng>(&self, w: u32, h: u32, rng: &mut R) -> Option<(u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }

        let max_x = (self.width - w) as f32;
        let max_y = (self.height - h) as f32;
        let origin_x = max_x / 2.0 * (1.0 + rng.gen_range(-0.1f32..=0.1));
        let origin_y = max_y / 2.0 * (1.0 + rng.gen_range(-0.1f32..=0.1));

        let aspect = self.width as f32 / self.height as f32;
        let max_radius = (self.width as f32 / aspect).max(self.height as f32);
        let growth = TURN_SPACING / std::f32::consts::TAU;
        let start_angle = rng.gen_range(0.0..std::f32::consts::TAU);

        let mut theta = 0.0f32;
        loop {
            let radius = growth * theta;
            if radius > max_radius {
                return None;
            }

            let angle = theta + start_angle;
            let x = origin_x + radius * aspect * angle.cos();
            let y = origin_y + radius * angle.sin();
            if (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y) {
                let (px, py) = (x.round() as u32, y.round() as u32);
                if self.is_free(px, py, w, h) {
                    return Some((px, py));
                }
            }

            theta += ARC_STEP / (radius * aspect).max(ARC_STEP);
        }
    }
}

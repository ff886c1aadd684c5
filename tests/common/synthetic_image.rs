use occlusion_heatmap::image::RgbaImage;

/// Opaque image filled with a single color.
pub fn solid_rgba(width: usize, height: usize, rgb: [u8; 3]) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbaImage::filled(width, height, [rgb[0], rgb[1], rgb[2], 255])
}

/// High-contrast checkerboard with opaque cells.
pub fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let val = if ((x / cell) + (y / cell)) & 1 == 0 { 32u8 } else { 220u8 };
            data.extend_from_slice(&[val, val, val, 255]);
        }
    }
    RgbaImage::from_raw(width, height, data).expect("checkerboard layout")
}

/// Deterministic xorshift32 stream.
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    /// Uniform-ish value in `[lo, hi)`.
    pub fn range(&mut self, lo: usize, hi: usize) -> usize {
        lo + (self.next_u32() as usize) % (hi - lo)
    }
}

/// Pseudo-random RGBA noise, alpha included.
pub fn noise_rgba(width: usize, height: usize, seed: u32) -> RgbaImage {
    let mut rng = XorShift::new(seed);
    let data = (0..width * height * 4)
        .map(|_| (rng.next_u32() >> 24) as u8)
        .collect();
    RgbaImage::from_raw(width, height, data).expect("noise layout")
}

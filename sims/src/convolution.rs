// convolution.rs - Square-kernel convolution over RGBA images

use tracing::debug;

use crate::error::SimError;

/// Odd-sized square matrix of weights, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, SimError> {
        if size == 0 || size % 2 == 0 {
            return Err(SimError::KernelSize(size));
        }
        if weights.len() != size * size {
            return Err(SimError::KernelWeights {
                size,
                expected: size * size,
                actual: weights.len(),
            });
        }
        Ok(Self { size, weights })
    }

    fn square(weights: [f32; 9]) -> Self {
        Self { size: 3, weights: weights.to_vec() }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn weight(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelPreset {
    Identity,
    BoxBlur,
    Sharpen,
    EdgeDetect,
    Emboss,
}

impl KernelPreset {
    pub const ALL: [KernelPreset; 5] = [
        KernelPreset::Identity,
        KernelPreset::BoxBlur,
        KernelPreset::Sharpen,
        KernelPreset::EdgeDetect,
        KernelPreset::Emboss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KernelPreset::Identity   => "Original",
            KernelPreset::BoxBlur    => "Box blur",
            KernelPreset::Sharpen    => "Sharpen",
            KernelPreset::EdgeDetect => "Edge detection",
            KernelPreset::Emboss     => "Emboss",
        }
    }

    pub fn kernel(self) -> Kernel {
        const NINTH: f32 = 1.0 / 9.0;
        match self {
            KernelPreset::Identity => Kernel::square([
                0.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 0.0,
            ]),
            KernelPreset::BoxBlur => Kernel::square([NINTH; 9]),
            KernelPreset::Sharpen => Kernel::square([
                 0.0, -1.0,  0.0,
                -1.0,  5.0, -1.0,
                 0.0, -1.0,  0.0,
            ]),
            KernelPreset::EdgeDetect => Kernel::square([
                -1.0, -1.0, -1.0,
                -1.0,  8.0, -1.0,
                -1.0, -1.0, -1.0,
            ]),
            KernelPreset::Emboss => Kernel::square([
                -2.0, -1.0, 0.0,
                -1.0,  1.0, 1.0,
                 0.0,  1.0, 2.0,
            ]),
        }
    }
}

/// RGBA8 image, 4 bytes per pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyDimensions { width, height });
        }
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(SimError::BufferLength { width, height, expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> [usize; 2] {
        [self.width, self.height]
    }

    /// RGBA at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        self.data.get(i..i + 4)?.try_into().ok()
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }
}

/// Weighted sum of each pixel's neighbourhood per colour channel.
/// Neighbours past the border contribute nothing; results are rounded and
/// clamped to `0..=255`; alpha is always opaque.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (w, h) = (src.width, src.height);
    let half = kernel.size / 2;
    let mut dst = vec![0u8; src.data.len()];

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for ky in 0..kernel.size {
                for kx in 0..kernel.size {
                    let (Some(sy), Some(sx)) = ((y + ky).checked_sub(half), (x + kx).checked_sub(half)) else {
                        continue;
                    };
                    if sy >= h || sx >= w {
                        continue;
                    }
                    let offset = (sy * w + sx) * 4;
                    let weight = kernel.weight(ky, kx);
                    for (c, sum) in acc.iter_mut().enumerate() {
                        *sum += src.data[offset + c] as f32 * weight;
                    }
                }
            }

            let out = (y * w + x) * 4;
            for (c, sum) in acc.into_iter().enumerate() {
                dst[out + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
            dst[out + 3] = 255;
        }
    }

    PixelBuffer { width: w, height: h, data: dst }
}

/// Keeps the loaded image untouched and renders filters from it on demand.
#[derive(Default)]
pub struct ImageLab {
    original: Option<PixelBuffer>,
    output: Option<PixelBuffer>,
    active: Option<KernelPreset>,
}

impl ImageLab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the source image and shows it unfiltered.
    pub fn load(&mut self, image: PixelBuffer) {
        debug!(width = image.width, height = image.height, "image loaded into lab");
        self.original = Some(image);
        self.apply(KernelPreset::Identity);
    }

    /// Renders `preset` from the original image. Does nothing before a load.
    pub fn apply(&mut self, preset: KernelPreset) {
        let Some(original) = &self.original else {
            return;
        };
        self.output = Some(convolve(original, &preset.kernel()));
        self.active = Some(preset);
    }

    pub fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn output(&self) -> Option<&PixelBuffer> {
        self.output.as_ref()
    }

    pub fn active(&self) -> Option<KernelPreset> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic test pattern with a translucent alpha channel.
    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[
                    (x * 37 % 256) as u8,
                    (y * 53 % 256) as u8,
                    ((x + y) * 19 % 256) as u8,
                    128,
                ]);
            }
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn identity_keeps_interior_pixels() {
        let src = gradient(7, 5);
        let out = convolve(&src, &KernelPreset::Identity.kernel());
        for y in 1..4 {
            for x in 1..6 {
                let [r, g, b, a] = out.pixel(x, y).unwrap();
                let [sr, sg, sb, _] = src.pixel(x, y).unwrap();
                assert_eq!((r, g, b), (sr, sg, sb));
                assert_eq!(a, 255);
            }
        }
    }

    #[test]
    fn border_neighbours_count_as_zero() {
        let src = PixelBuffer::from_rgba(3, 3, vec![90; 36]).unwrap();
        let out = convolve(&src, &KernelPreset::BoxBlur.kernel());
        assert_eq!(out.pixel(1, 1).unwrap(), [90, 90, 90, 255]);
        // Corner sees 4 of 9 neighbours: 90 * 4 / 9 = 40
        assert_eq!(out.pixel(0, 0).unwrap(), [40, 40, 40, 255]);
        // Edge sees 6 of 9
        assert_eq!(out.pixel(1, 0).unwrap(), [60, 60, 60, 255]);
    }

    #[test]
    fn sums_are_clamped() {
        let mut data = vec![0u8; 36];
        data[4 * 4..4 * 4 + 3].copy_from_slice(&[200, 200, 200]);
        let src = PixelBuffer::from_rgba(3, 3, data).unwrap();
        let out = convolve(&src, &KernelPreset::Sharpen.kernel());
        assert_eq!(out.pixel(1, 1).unwrap(), [255, 255, 255, 255]);
        assert_eq!(out.pixel(1, 0).unwrap(), [0, 0, 0, 255]);
    }

    #[test]
    fn pixels_outside_the_image_are_none() {
        let src = gradient(3, 2);
        assert!(src.pixel(2, 1).is_some());
        assert_eq!(src.pixel(3, 0), None);
        assert_eq!(src.pixel(0, 2), None);
        assert_eq!(src.pixel(usize::MAX, 0), None);
    }

    #[test]
    fn kernel_validation() {
        assert_eq!(Kernel::new(2, vec![0.0; 4]), Err(SimError::KernelSize(2)));
        assert_eq!(Kernel::new(0, vec![]), Err(SimError::KernelSize(0)));
        assert!(matches!(Kernel::new(3, vec![0.0; 8]), Err(SimError::KernelWeights { expected: 9, .. })));
        assert_eq!(Kernel::new(5, vec![0.04; 25]).unwrap().size(), 5);
    }

    #[test]
    fn larger_kernels_are_supported() {
        let mut weights = vec![0.0; 25];
        weights[12] = 1.0;
        let src = gradient(6, 6);
        let out = convolve(&src, &Kernel::new(5, weights).unwrap());
        assert_eq!(out.pixel(3, 2).unwrap()[..3], src.pixel(3, 2).unwrap()[..3]);
    }

    #[test]
    fn buffer_length_is_checked() {
        assert!(matches!(
            PixelBuffer::from_rgba(2, 2, vec![0; 15]),
            Err(SimError::BufferLength { expected: 16, actual: 15, .. })
        ));
        assert!(PixelBuffer::from_rgba(0, 2, vec![]).is_err());
    }

    #[test]
    fn filters_start_from_the_original() {
        let mut lab = ImageLab::new();
        lab.apply(KernelPreset::EdgeDetect);
        assert!(lab.output().is_none());
        assert_eq!(lab.active(), None);

        let src = gradient(8, 8);
        lab.load(src.clone());
        assert_eq!(lab.active(), Some(KernelPreset::Identity));

        lab.apply(KernelPreset::BoxBlur);
        let blurred_once = lab.output().cloned().unwrap();
        lab.apply(KernelPreset::Sharpen);
        lab.apply(KernelPreset::BoxBlur);
        assert_eq!(lab.output(), Some(&blurred_once));
        assert_eq!(lab.original(), Some(&src));
    }
}

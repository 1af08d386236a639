//! Font loading and glyph atlases for overlay text.
//!
//! One font face is loaded at startup. Atlases are rasterized lazily, one
//! per pixel size, the first time text of that size is drawn.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use log::{debug, info, warn};

use crate::gpu::GpuContext;

/// Places to look for a font when none is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Characters rasterized into every atlas besides printable ASCII.
const EXTRA_CHARS: &[char] = &['→', '←', '•', '·', '–', '—', '…', '©'];

/// Information about a single glyph in an atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphInfo {
    /// UV coordinates in the atlas (x, y, width, height) normalized to [0, 1].
    pub uv: [f32; 4],
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the glyph's bottom-left corner.
    pub offset_x: f32,
    pub offset_y: f32,
    pub advance: f32,
}

/// Result of packing rectangles into rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedRows {
    pub width: u32,
    pub height: u32,
    /// Top-left corner of each input rectangle.
    pub positions: Vec<(u32, u32)>,
}

/// Pack rectangles left to right in rows, doubling the atlas until they fit.
pub fn pack_rows(sizes: &[(u32, u32)], padding: u32) -> PackedRows {
    let mut width = 256u32;
    let mut height = 256u32;
    loop {
        if let Some(positions) = try_pack(sizes, padding, width, height) {
            return PackedRows {
                width,
                height,
                positions,
            };
        }
        if width <= height {
            width *= 2;
        } else {
            height *= 2;
        }
    }
}

fn try_pack(sizes: &[(u32, u32)], padding: u32, width: u32, height: u32) -> Option<Vec<(u32, u32)>> {
    let mut positions = Vec::with_capacity(sizes.len());
    let (mut x, mut y, mut row_height) = (padding, padding, 0u32);
    for &(w, h) in sizes {
        if w + 2 * padding > width {
            return None;
        }
        if x + w + padding > width {
            x = padding;
            y += row_height + padding;
            row_height = 0;
        }
        if y + h + padding > height {
            return None;
        }
        positions.push((x, y));
        x += w + padding;
        row_height = row_height.max(h);
    }
    Some(positions)
}

/// Rasterized glyphs for one pixel size, still on the CPU.
#[derive(Clone, Debug)]
pub struct GlyphSheet {
    pub width: u32,
    pub height: u32,
    /// One coverage byte per texel.
    pub pixels: Vec<u8>,
    glyphs: HashMap<char, GlyphInfo>,
    size: f32,
    line_height: f32,
    ascent: f32,
}

impl GlyphSheet {
    pub fn rasterize(font: &Font, size: f32) -> Self {
        let chars: Vec<char> = (32u8..=126u8)
            .map(char::from)
            .chain(EXTRA_CHARS.iter().copied())
            .filter(|&c| c == ' ' || font.lookup_glyph_index(c) != 0)
            .collect();
        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = chars
            .iter()
            .map(|&c| {
                let (metrics, bitmap) = font.rasterize(c, size);
                (c, metrics, bitmap)
            })
            .collect();

        let sizes: Vec<(u32, u32)> = rasterized
            .iter()
            .map(|(_, m, _)| (m.width as u32, m.height as u32))
            .collect();
        let packed = pack_rows(&sizes, 1);

        let mut pixels = vec![0u8; (packed.width * packed.height) as usize];
        let mut glyphs = HashMap::with_capacity(rasterized.len());
        for ((c, metrics, bitmap), &(x, y)) in rasterized.iter().zip(&packed.positions) {
            let (w, h) = (metrics.width as u32, metrics.height as u32);
            for gy in 0..h {
                let src = (gy * w) as usize;
                let dst = ((y + gy) * packed.width + x) as usize;
                pixels[dst..dst + w as usize].copy_from_slice(&bitmap[src..src + w as usize]);
            }
            glyphs.insert(
                *c,
                GlyphInfo {
                    uv: [
                        x as f32 / packed.width as f32,
                        y as f32 / packed.height as f32,
                        w as f32 / packed.width as f32,
                        h as f32 / packed.height as f32,
                    ],
                    width: w,
                    height: h,
                    offset_x: metrics.xmin as f32,
                    offset_y: metrics.ymin as f32,
                    advance: metrics.advance_width,
                },
            );
        }

        let line_metrics = font.horizontal_line_metrics(size);
        Self {
            width: packed.width,
            height: packed.height,
            pixels,
            glyphs,
            size,
            line_height: line_metrics.map_or(size * 1.2, |m| m.new_line_size),
            ascent: line_metrics.map_or(size * 0.8, |m| m.ascent),
        }
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Width of a single line of text. Missing glyphs count half an em.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| self.glyphs.get(&c).map_or(self.size * 0.5, |g| g.advance))
            .sum()
    }
}

/// A glyph sheet uploaded to the GPU.
pub struct FontAtlas {
    pub sheet: GlyphSheet,
    pub view: wgpu::TextureView,
}

impl FontAtlas {
    pub fn upload(gpu: &GpuContext, sheet: GlyphSheet) -> Self {
        let size = wgpu::Extent3d {
            width: sheet.width,
            height: sheet.height,
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Font Atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &sheet.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(sheet.width),
                rows_per_image: Some(sheet.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { sheet, view }
    }
}

/// The overlay font plus its per-size atlases.
#[derive(Default)]
pub struct Fonts {
    font: Option<Font>,
    atlases: HashMap<u32, FontAtlas>,
}

impl Fonts {
    /// Load `configured`, or the first system font found. Without any font,
    /// overlay text is skipped.
    pub fn load(configured: Option<&Path>) -> Self {
        let font = find_font(configured).and_then(|(path, bytes)| {
            match Font::from_bytes(bytes, FontSettings::default()) {
                Ok(font) => {
                    info!("overlay font: {}", path.display());
                    Some(font)
                }
                Err(err) => {
                    warn!("couldn't parse font {}: {err}", path.display());
                    None
                }
            }
        });
        if font.is_none() {
            warn!("no usable font found; overlay text will not be drawn (set `font_path`)");
        }
        Self {
            font,
            atlases: HashMap::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.font.is_some()
    }

    /// Atlas for `px` pixel text, rasterizing it on first use.
    pub fn atlas(&mut self, gpu: &GpuContext, px: u32) -> Option<&FontAtlas> {
        let font = self.font.as_ref()?;
        let px = px.max(1);
        Some(self.atlases.entry(px).or_insert_with(|| {
            debug!("rasterizing {px}px glyph atlas");
            FontAtlas::upload(gpu, GlyphSheet::rasterize(font, px as f32))
        }))
    }
}

fn find_font(configured: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    if let Some(path) = configured {
        match fs::read(path) {
            Ok(bytes) => return Some((path.to_path_buf(), bytes)),
            Err(err) => warn!("couldn't read font {}: {err}", path.display()),
        }
    }
    SYSTEM_FONTS.iter().map(PathBuf::from).find_map(|path| {
        let bytes = fs::read(&path).ok()?;
        Some((path, bytes))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_wraps_rows_and_respects_padding() {
        let packed = pack_rows(&[(100, 10), (100, 20), (100, 5)], 1);
        assert_eq!(packed.width, 256);
        assert_eq!(packed.positions, vec![(1, 1), (102, 1), (1, 22)]);
    }

    #[test]
    fn packing_grows_until_everything_fits() {
        let sizes = vec![(60, 60); 40];
        let packed = pack_rows(&sizes, 1);
        assert!(packed.width * packed.height >= 40 * 61 * 61);
        for (&(x, y), &(w, h)) in packed.positions.iter().zip(&sizes) {
            assert!(x + w < packed.width && y + h < packed.height);
        }
    }

    #[test]
    fn missing_configured_font_falls_back_to_system_paths() {
        let configured = Path::new("no/such/font.ttf");
        if let Some((path, bytes)) = find_font(Some(configured)) {
            assert_ne!(path, configured);
            assert!(SYSTEM_FONTS.iter().any(|p| Path::new(p) == path));
            assert!(!bytes.is_empty());
        }
    }

    #[test]
    fn fonts_without_a_face_report_unloaded() {
        assert!(!Fonts::default().is_loaded());
    }
}

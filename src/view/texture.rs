use std::fs;
use std::path::Path;

use image::{imageops, RgbaImage};
use tracing::{debug, info};

use crate::error::TextureError;

/// Opaque texture id handed out by a [`TextureProvider`]. Zero is never a
/// valid texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const INVALID: TextureHandle = TextureHandle(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Maps asset paths to texture handles. The GPU upload lives behind this.
pub trait TextureProvider {
    fn load(&mut self, path: &Path) -> Result<TextureHandle, TextureError>;
}

/// Decodes image files on the CPU and keeps the pixels, handles count from 1.
#[derive(Default)]
pub struct ImageTextureProvider {
    textures: Vec<RgbaImage>,
}

impl ImageTextureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        let idx = (handle.0 as usize).checked_sub(1)?;
        self.textures.get(idx)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureProvider for ImageTextureProvider {
    fn load(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
        let image = read_rgba(path)?;
        debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded texture");
        self.textures.push(image);
        Ok(TextureHandle(self.textures.len() as u32))
    }
}

fn read_rgba(path: &Path) -> Result<RgbaImage, TextureError> {
    let bytes = fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Square tiles packed row-major into one image.
pub struct TextureAtlas {
    image: RgbaImage,
    names: Vec<String>,
    tile_size: u32,
    tiles_per_row: u32,
}

impl TextureAtlas {
    pub const DEFAULT_TILE_SIZE: u32 = 16;
    pub const DEFAULT_TILES_PER_ROW: u32 = 4;

    pub fn build(
        tiles: &[(String, RgbaImage)],
        tile_size: u32,
        tiles_per_row: u32,
    ) -> Result<Self, TextureError> {
        if tiles.is_empty() || tiles_per_row == 0 {
            return Err(TextureError::EmptyAtlas);
        }

        let rows = (tiles.len() as u32).div_ceil(tiles_per_row);
        let mut image = RgbaImage::new(tiles_per_row * tile_size, rows * tile_size);
        let mut names = Vec::with_capacity(tiles.len());

        for (idx, (name, tile)) in tiles.iter().enumerate() {
            if tile.width() != tile_size || tile.height() != tile_size {
                return Err(TextureError::TileSize {
                    name: name.clone(),
                    width: tile.width(),
                    height: tile.height(),
                    tile_size,
                });
            }
            let idx = idx as u32;
            let x = (idx % tiles_per_row) * tile_size;
            let y = (idx / tiles_per_row) * tile_size;
            imageops::replace(&mut image, tile, x as i64, y as i64);
            names.push(name.clone());
        }

        Ok(Self {
            image,
            names,
            tile_size,
            tiles_per_row,
        })
    }

    /// Packs every `.png` in `dir`, ordered by file name; tiles are named by file stem.
    pub fn from_dir(dir: &Path, tile_size: u32, tiles_per_row: u32) -> Result<Self, TextureError> {
        let io_err = |source| TextureError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "png") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tiles = Vec::with_capacity(paths.len());
        for path in &paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            tiles.push((name, read_rgba(path)?));
        }
        Self::build(&tiles, tile_size, tiles_per_row)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn tile_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// `[u0, v0, u1, v1]` of a tile, v growing downwards.
    pub fn uv_rect(&self, name: &str) -> Option<[f32; 4]> {
        let idx = self.tile_index(name)? as u32;
        let col = (idx % self.tiles_per_row) as f32;
        let row = (idx / self.tiles_per_row) as f32;
        let tile_u = self.tile_size as f32 / self.image.width() as f32;
        let tile_v = self.tile_size as f32 / self.image.height() as f32;
        Some([
            col * tile_u,
            row * tile_v,
            (col + 1.0) * tile_u,
            (row + 1.0) * tile_v,
        ])
    }

    pub fn save(&self, path: &Path) -> Result<(), TextureError> {
        self.image.save(path)?;
        info!(path = %path.display(), tiles = self.names.len(), "texture atlas saved");
        Ok(())
    }
}

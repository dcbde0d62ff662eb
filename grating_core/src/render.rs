//! Grayscale PNG export for frames and sequences.
//!
//! Intensity 0 is drawn black and 1 white.

use std::io;
use std::path::Path;

use ndarray::ArrayView2;
use plotters::prelude::*;

use crate::grating::GratingSequence;

/// Writes a single frame as a `cols x rows` grayscale PNG.
pub fn save_frame_png<P: AsRef<Path>>(frame: ArrayView2<'_, f64>, path: P) -> io::Result<()> {
    let (rows, cols) = frame.dim();
    let width = span(1, cols, 0).ok_or_else(|| invalid_input("frame is too wide for a bitmap"))?;
    let height =
        span(1, rows, 0).ok_or_else(|| invalid_input("frame is too tall for a bitmap"))?;
    let path = path.as_ref();
    create_parent(path)?;

    let backend = BitMapBackend::new(path, (width, height));
    let drawing_area = backend.into_drawing_area();
    draw_tile(&drawing_area, frame, (0, 0))?;
    drawing_area.present().map_err(backend_error)
}

/// Tiles every frame of `sequence` into one image, `columns` tiles per row in
/// time order, separated by `gutter` black pixels.
pub fn save_contact_sheet<P: AsRef<Path>>(
    sequence: &GratingSequence,
    columns: usize,
    gutter: u32,
    path: P,
) -> io::Result<()> {
    let (frames, rows, cols) = sequence.shape();
    let (width, height) = sheet_size(frames, rows, cols, columns, gutter)?;
    let path = path.as_ref();
    create_parent(path)?;

    let backend = BitMapBackend::new(path, (width, height));
    let drawing_area = backend.into_drawing_area();
    drawing_area.fill(&BLACK).map_err(backend_error)?;

    for (index, frame) in sequence.iter().enumerate() {
        let origin = tile_origin(index, rows, cols, columns, gutter);
        draw_tile(&drawing_area, frame, origin)?;
    }

    tracing::debug!(frames, width, height, path = %path.display(), "wrote contact sheet");
    drawing_area.present().map_err(backend_error)
}

/// Pixel size of a contact sheet.
///
/// Fails with `InvalidInput` when `columns` is zero or either side does not
/// fit the bitmap backend's `i32` coordinates.
pub fn sheet_size(
    frames: usize,
    rows: usize,
    cols: usize,
    columns: usize,
    gutter: u32,
) -> io::Result<(u32, u32)> {
    if columns == 0 {
        return Err(invalid_input("contact sheet needs at least one column"));
    }
    let across = frames.min(columns).max(1);
    let down = frames.div_ceil(columns).max(1);
    let width = span(across, cols, gutter)
        .ok_or_else(|| invalid_input("contact sheet is too wide"))?;
    let height = span(down, rows, gutter)
        .ok_or_else(|| invalid_input("contact sheet is too tall"))?;
    Ok((width, height))
}

/// Length of `tiles` tiles of `tile` pixels with gutters between them.
fn span(tiles: usize, tile: usize, gutter: u32) -> Option<u32> {
    let tiles = u32::try_from(tiles).ok()?;
    let tile = u32::try_from(tile).ok()?;
    let extent = tiles
        .checked_mul(tile)?
        .checked_add(tiles.checked_sub(1)?.checked_mul(gutter)?)?;
    i32::try_from(extent).ok().map(|_| extent)
}

/// Top-left pixel of tile `index`; lies inside a sheet accepted by [`sheet_size`].
fn tile_origin(index: usize, rows: usize, cols: usize, columns: usize, gutter: u32) -> (i32, i32) {
    let tile_col = (index % columns) as u64;
    let tile_row = (index / columns) as u64;
    let x = tile_col * (cols as u64 + gutter as u64);
    let y = tile_row * (rows as u64 + gutter as u64);
    (x as i32, y as i32)
}

fn invalid_input(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}

fn draw_tile<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    frame: ArrayView2<'_, f64>,
    (x0, y0): (i32, i32),
) -> io::Result<()>
where
    DB::ErrorType: 'static,
{
    for ((row, col), value) in frame.indexed_iter() {
        let level = intensity_to_byte(*value);
        area.draw_pixel(
            (x0 + col as i32, y0 + row as i32),
            &RGBColor(level, level, level),
        )
        .map_err(backend_error)?;
    }
    Ok(())
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn backend_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Maps an intensity in [0, 1] to an 8-bit grey level.
pub fn intensity_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

//! Image derivations over in-memory bitmaps.

mod raster;

pub use raster::RasterTransformer;

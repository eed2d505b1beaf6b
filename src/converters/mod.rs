pub mod outline;
pub mod raster;
pub mod svg;

mod buffer_surface;

pub use buffer_surface::BufferSurface;

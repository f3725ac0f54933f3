pub mod libvips;

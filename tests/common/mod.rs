#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use vips_binding::{Runtime, RuntimeConfig};

static START: Once = Once::new();

/// Starts libvips once for the whole test binary and never shuts it down.
pub fn start_vips() {
    START.call_once(|| {
        let runtime = Runtime::start(&RuntimeConfig {
            name: "vips-binding-tests".to_string(),
            ..RuntimeConfig::default()
        })
        .expect("libvips failed to start");
        std::mem::forget(runtime);
    });
}

/// Writes a 2×2 8-bit greyscale PGM with pixels 0, 255, 255, 0 and returns
/// its path. The average of this image is 127.5.
pub fn checkerboard_pgm(name: &str) -> PathBuf {
    let path = temp_path(&format!("{name}.pgm"));
    let mut bytes = b"P5\n2 2\n255\n".to_vec();
    bytes.extend_from_slice(&[0, 255, 255, 0]);
    std::fs::write(&path, bytes).expect("failed to write fixture");
    path
}

/// A path in the temp directory unique to this process.
pub fn temp_path(file_name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vips-binding-{}-{file_name}", std::process::id()))
}

fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // `processing::libvips::sys` calls libvips and GObject through the
    // libvips-rs bindings, which carry no link directives: the crate ships no
    // build script of its own, so the native libraries are linked here.
    //
    // The VIPS_DIR environment variable points at a libvips install prefix
    // (containing `lib/`) when the system package is not used.
    if std::env::var_os("CARGO_FEATURE_VIPS").is_some() {
        link_libvips();
    }
}

fn link_libvips() {
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    if let Ok(vips_dir) = std::env::var("VIPS_DIR") {
        let lib_dir = std::path::Path::new(&vips_dir).join("lib");
        if lib_dir.exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            println!("cargo:warning=VIPS_DIR is set but '{}' does not exist", lib_dir.display());
        }
    }

    if cfg!(target_os = "windows") {
        // The MSVC import libraries carry the `lib` prefix in their names.
        println!("cargo:rustc-link-lib=dylib=libvips");
        println!("cargo:rustc-link-lib=dylib=libglib-2.0");
        println!("cargo:rustc-link-lib=dylib=libgobject-2.0");
    } else {
        println!("cargo:rustc-link-lib=dylib=vips");
        // g_object_unref is called directly, not only through libvips.
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
    }
}

use std::{env, path::PathBuf};

fn main() {
    println!("cargo::rustc-check-cfg=cfg(libheif)");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    // pkg-config also emits the link-search and link-lib lines for us
    let library = match pkg_config::Config::new()
        .atleast_version("1.7.0")
        .probe("libheif")
    {
        Ok(library) => library,
        Err(e) => {
            println!("cargo:warning=Building without libheif ({e}); HEIC decoding is disabled");
            return;
        }
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    //
    // ---- Generate libheif bindings ----
    //
    let mut builder = bindgen::Builder::default()
        .header_contents("heif_wrapper.h", "#include <libheif/heif.h>\n")
        .prepend_enum_name(false)
        // Context
        .allowlist_function("heif_context_alloc")
        .allowlist_function("heif_context_free")
        .allowlist_function("heif_context_read_from_file")
        .allowlist_function("heif_context_get_primary_image_handle")
        // Handle
        .allowlist_function("heif_image_handle_release")
        .allowlist_function("heif_decode_image")
        // Decoded image
        .allowlist_function("heif_image_release")
        .allowlist_function("heif_image_get_width")
        .allowlist_function("heif_image_get_height")
        .allowlist_function("heif_image_get_plane_readonly")
        // Types
        .allowlist_type("heif_error")
        .allowlist_type("heif_error_code")
        .allowlist_type("heif_colorspace")
        .allowlist_type("heif_chroma")
        .allowlist_type("heif_channel")
        .raw_line("// Mark extern blocks as unsafe for Rust 2024");

    for path in &library.include_paths {
        builder = builder.clang_arg(format!("-I{}", path.display()));
    }

    let bindings = match builder.generate() {
        Ok(bindings) => bindings,
        Err(e) => {
            println!("cargo:warning=Could not generate libheif bindings ({e}); HEIC decoding is disabled");
            return;
        }
    };

    let out_path = out_dir.join("heif_bindings.rs");
    bindings
        .write_to_file(&out_path)
        .expect("Couldn't write libheif bindings!");

    // Read the generated file and add unsafe to extern blocks
    let contents = std::fs::read_to_string(&out_path).unwrap();
    let fixed = contents.replace("extern \"C\" {", "unsafe extern \"C\" {");
    std::fs::write(&out_path, fixed).unwrap();

    println!("cargo:rustc-cfg=libheif");
}

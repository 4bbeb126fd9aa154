use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");
    println!("cargo:rerun-if-env-changed=VCPKGRS_TRIPLET");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        if env::var_os("FFMPEG_DIR").is_none() {
            println!(
                "cargo:warning=Neither FFMPEG_DIR nor VCPKG_ROOT is set. Install ffmpeg and sdl2 via vcpkg so both libraries can be found."
            );
        }
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let installed = PathBuf::from(&vcpkg_root).join("installed").join(&triplet);

    if env::var_os("FFMPEG_DIR").is_none() && installed.join("include").join("libavformat").exists() {
        println!(
            "cargo:warning=Found vcpkg FFmpeg at {}. Set FFMPEG_DIR to that path to use it.",
            installed.display(),
        );
    }

    // The window backend links SDL2 from the same vcpkg tree.
    if env::var_os("CARGO_FEATURE_WINDOW").is_some() {
        let lib_dir = installed.join("lib");
        if lib_dir.join("SDL2.lib").exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            println!(
                "cargo:warning=The window feature needs SDL2, but {} has no SDL2.lib.",
                lib_dir.display(),
            );
        }
    }
}

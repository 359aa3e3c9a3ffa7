//! Build script for the e-bike display simulator.
//!
//! On Windows, links against the SDL2 import library kept in
//! `firmware/vendor/sdl2/`. Other hosts use the system SDL2.

use std::env;
use std::path::PathBuf;

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let sdl2 = manifest_dir.parent().unwrap().join("vendor").join("sdl2");
    if sdl2.exists() {
        println!("cargo:rustc-link-search=native={}", sdl2.display());
    } else {
        println!("cargo:warning=SDL2.lib not found in {}", sdl2.display());
    }
    println!("cargo:rerun-if-changed={}", sdl2.display());
}

//! xmsconan-lib: build and packaging helpers for XMS C++ libraries
//!
//! The XMS libraries are built with Conan 2 and CMake across a fixed
//! matrix of compilers, build types and library options. This crate holds
//! the pieces the `xmsconan` tool is made of:
//! - `matrix`: per-platform configuration matrix and its text table
//! - `profile`: reading root options from Conan profiles and writing generated ones
//! - `driver`: `conan install` + CMake configure for a single profile
//! - `package`: `conan create` across the matrix, plus upload
//! - `render`: build files from Jinja templates and TOML data

pub mod consts;
pub mod driver;
pub mod exec;
pub mod matrix;
pub mod package;
pub mod platform;
pub mod profile;
pub mod render;
pub mod util;

// Library crate: decal placement core plus the headless session driven by the
// script runner, the HTTP server and the wasm bindings.

pub mod carrier;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod import;
pub mod mapper;
pub mod normalize;
pub mod proxy;
pub mod resolver;
pub mod state;
pub mod tuning;
pub mod upload;
pub mod validation;

/// Renderer-independent viewport pieces: mesh buffers, picking, zone camera.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}

use icycon_frontend::App;
use leptos::prelude::*;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    // tracing events reach the console through the `log` bridge
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    mount_to_body(App);
}

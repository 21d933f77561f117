mod api;
mod app;
mod components;

const MOUNT_ID: &str = "app";

fn mount_point() -> Option<web_sys::Element> {
  web_sys::window()?
    .document()?
    .get_element_by_id(MOUNT_ID)
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(root) = mount_point() else {
    tracing::error!(
      mount = MOUNT_ID,
      "mount element not found; page \
       left empty"
    );
    return;
  };

  tracing::info!(
    version = env!("CARGO_PKG_VERSION"),
    mount = MOUNT_ID,
    "rendering task manager"
  );
  yew::Renderer::<app::App>::with_root(
    root
  )
  .render();
}

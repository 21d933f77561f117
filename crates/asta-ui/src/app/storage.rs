use crate::api::BackendConfig;

const BACKEND_STORAGE_KEY: &str =
  "asta.backend";

/// Backend address and user, optionally
/// overridden from local storage with
/// JSON such as
/// `{"base_url":"http://host:8000","user_id":2}`.
pub fn load_backend_config()
-> BackendConfig {
  let stored = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(BACKEND_STORAGE_KEY)
        .ok()
        .flatten()
    });

  let config = match stored {
    | Some(raw) => {
      match parse_backend_config(&raw)
      {
        | Ok(config) => {
          tracing::info!(
            base_url = %config.base_url,
            user_id = config.user_id,
            "loaded backend override \
             from local storage"
          );
          config
        }
        | Err(error) => {
          tracing::error!(
            %error,
            "failed parsing backend \
             config from local storage"
          );
          BackendConfig::default()
        }
      }
    }
    | None => BackendConfig::default()
  };

  config.normalized()
}

fn parse_backend_config(
  raw: &str
) -> Result<BackendConfig, serde_json::Error>
{
  serde_json::from_str::<BackendConfig>(
    raw
  )
  .map(BackendConfig::normalized)
}

/// Backend origin baked in at build time (`BACKEND_URL=https://... trunk build`).
/// Empty means same origin, which is how the backend serves the site.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

//! External Link Commands

/// Open an http(s) link in the system browser
#[tauri::command]
pub async fn open_external(url: String) -> Result<(), String> {
    if !is_web_link(&url) {
        return Err(format!("Refusing to open non-web link: {}", url));
    }
    open::that(&url).map_err(|e| e.to_string())
}

fn is_web_link(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

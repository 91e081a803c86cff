use tauri::{image::Image, AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};
use url::Url;
use webform_shell::{append_window_log, HostError, WindowHandle, WindowHost, WindowRequest};

/// [`WindowHost`] backed by Tauri webview windows.
pub(crate) struct TauriWindowHost<'a> {
    app_handle: &'a AppHandle,
}

impl<'a> TauriWindowHost<'a> {
    pub(crate) fn new(app_handle: &'a AppHandle) -> Self {
        Self { app_handle }
    }
}

impl WindowHost for TauriWindowHost<'_> {
    fn create_window(&mut self, request: &WindowRequest) -> Result<WindowHandle, HostError> {
        let url = Url::parse(&request.url).map_err(|error| {
            HostError(format!("Invalid window url for {}: {error}", request.label))
        })?;

        let mut builder =
            WebviewWindowBuilder::new(self.app_handle, &request.label, WebviewUrl::External(url))
                .title(request.title.as_str())
                .inner_size(request.width, request.height)
                .visible(request.visible);

        if let Some(icon_path) = &request.icon {
            match Image::from_path(icon_path) {
                Ok(icon) => {
                    builder = builder.icon(icon).map_err(|error| {
                        HostError(format!("Failed to apply window icon: {error}"))
                    })?;
                }
                // icns and jpg are not decodable here; the window still opens.
                Err(error) => append_window_log(&format!(
                    "window icon {} skipped: {error}",
                    icon_path.display()
                )),
            }
        }

        builder.build().map_err(|error| {
            HostError(format!("Failed to create window {}: {error}", request.label))
        })?;
        Ok(WindowHandle::new(request.label.clone()))
    }

    fn window_exists(&self, label: &str) -> bool {
        self.app_handle.get_webview_window(label).is_some()
    }

    fn reveal_window(&mut self, label: &str) -> Result<(), HostError> {
        let Some(window) = self.app_handle.get_webview_window(label) else {
            return Err(HostError(format!("Window {label} no longer exists")));
        };
        if let Err(error) = window.unminimize() {
            append_window_log(&format!("failed to unminimize {label}: {error}"));
        }
        window
            .show()
            .map_err(|error| HostError(format!("Failed to show window {label}: {error}")))?;
        if let Err(error) = window.set_focus() {
            append_window_log(&format!("failed to focus {label}: {error}"));
        }
        Ok(())
    }

    fn exit(&mut self, code: i32) {
        self.app_handle.exit(code);
    }
}

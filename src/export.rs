//! Certificate image export.
//!
//! Rasterization is delegated to a `Rasterizer` (html2canvas in the browser).
//! Action controls are hidden for the capture and restored on every exit
//! path through the `HiddenControls` guard.

use crate::certificate::Certificate;
use crate::config::HuntConfig;
use crate::error::ExportError;

/// Options forwarded to the rasterizer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub background_color: String,
    pub scale: f64,
}

impl RenderOptions {
    pub fn from_config(config: &HuntConfig) -> Self {
        Self {
            background_color: config.export_background.clone(),
            scale: config.export_scale,
        }
    }
}

/// A rendered image, addressable by URL (data: or blob:).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub href: String,
}

/// A ready-to-trigger download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub href: String,
}

/// Renders the certificate view to an image.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or encoding fails.
    async fn rasterize(&self, options: &RenderOptions) -> Result<RasterImage, ExportError>;
}

/// UI controls that must not appear in the captured image.
pub trait CaptureControls {
    fn hide(&self);
    fn restore(&self);
}

/// Hides controls for its lifetime.
#[must_use = "controls are restored as soon as the guard is dropped"]
pub struct HiddenControls<'a, C: CaptureControls + ?Sized> {
    controls: &'a C,
}

impl<'a, C: CaptureControls + ?Sized> HiddenControls<'a, C> {
    pub fn new(controls: &'a C) -> Self {
        controls.hide();
        Self { controls }
    }
}

impl<C: CaptureControls + ?Sized> Drop for HiddenControls<'_, C> {
    fn drop(&mut self) {
        self.controls.restore();
    }
}

/// Rasterize the certificate with controls hidden and name the download.
///
/// # Errors
///
/// Returns the rasterizer's `ExportError`; controls are visible again either way.
pub async fn export_certificate<R, C>(
    certificate: &Certificate,
    rasterizer: &R,
    controls: &C,
    config: &HuntConfig,
) -> Result<Download, ExportError>
where
    R: Rasterizer + ?Sized,
    C: CaptureControls + ?Sized,
{
    let options = RenderOptions::from_config(config);
    let image = {
        let _hidden = HiddenControls::new(controls);
        rasterizer.rasterize(&options).await?
    };
    Ok(Download {
        file_name: certificate.file_name(&config.certificate_prefix),
        href: image.href,
    })
}

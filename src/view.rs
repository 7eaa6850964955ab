//! Presentation seam between `Hunt` and whatever renders it.

use crate::certificate::Certificate;
use crate::levels::Level;
use crate::navigation::{Landing, Page};
use crate::schedule::Scheduled;

/// Everything the hunt needs from a renderer. The browser implementation is
/// `web::DomView`; tests record calls instead.
pub trait HuntView {
    /// Make `page` the only visible page.
    fn show_page(&mut self, page: Page);
    /// Rebuild the landing buttons for the given progress variant.
    fn render_landing(&mut self, landing: Landing);
    /// Set (or clear with `None`) the inline message under a level input.
    fn show_message(&mut self, level: Level, message: Option<&str>);
    /// Clear and highlight the input of a solved level.
    fn mark_accepted(&mut self, level: Level);
    fn set_shaking(&mut self, level: Level, shaking: bool);
    fn focus_input(&mut self, page: Page);
    fn show_certificate(&mut self, certificate: &Certificate);
    /// Empty every answer input and the name field and blank the certificate,
    /// leaving the page as a fresh load would.
    fn clear_inputs(&mut self);
    /// Blocking user notification.
    fn alert(&mut self, message: &str);
    /// Arm a timer that later calls `Hunt::fire(timer.id)`.
    fn schedule(&mut self, timer: Scheduled);
}

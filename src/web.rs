//! Browser glue.
//!
//! `DomView` renders the hunt into the page markup (`.page` sections with ids
//! `landing`, `level1`..`level5`, `final`, `certificate`; inputs `answerN` with
//! message slots `errorN`; `#landingButtons`, `#userName`,
//! `#certificateContent`, `#certificateName`, `#certificateDate` and
//! `.certificate-actions`). The exported functions are what the page's
//! buttons call.

use std::cell::RefCell;
use std::sync::Once;

use chrono::NaiveDate;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    KeyboardEvent, window,
};

use crate::certificate::Certificate;
use crate::config::HuntConfig;
use crate::error::ExportError;
use crate::export::{
    CaptureControls, Download, RasterImage, Rasterizer, RenderOptions, export_certificate,
};
use crate::hunt::{EXPORT_FAILED_MESSAGE, Hunt, RESET_CONFIRM_MESSAGE};
use crate::levels::Level;
use crate::navigation::{Landing, Page};
use crate::schedule::Scheduled;
use crate::storage::BrowserStorage;
use crate::view::HuntView;

const SHAKE_STYLE_ID: &str = "hunt-shake-keyframes";
const SHAKE_KEYFRAMES: &str = "
    @keyframes shake {
        0%, 100% { transform: translateX(0); }
        10%, 30%, 50%, 70%, 90% { transform: translateX(-5px); }
        20%, 40%, 60%, 80% { transform: translateX(5px); }
    }
";

type BrowserHunt = Hunt<BrowserStorage, DomView>;

thread_local! {
    static HUNT: RefCell<Option<BrowserHunt>> = const { RefCell::new(None) };
}

fn with_hunt<R>(f: impl FnOnce(&mut BrowserHunt) -> R) -> Option<R> {
    HUNT.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn js_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn alert(message: &str) {
    if let Some(win) = window() {
        win.alert_with_message(message).ok();
    }
}

fn input_value(id: &str) -> String {
    document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

// --- Entry points -------------------------------------------------------------

#[wasm_bindgen]
pub fn start_hunt() -> Result<(), JsValue> {
    start_hunt_with_config(None)
}

/// Start with JSON configuration overrides (see `HuntConfig`).
#[wasm_bindgen]
pub fn start_hunt_with_config(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => HuntConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => HuntConfig::default(),
    };
    init_logging(&config);

    if HUNT.with(|cell| cell.borrow().is_some()) {
        log::warn!("hunt already started");
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    install_shake_keyframes(&doc)?;

    let view = DomView::new(doc.clone(), config.shake_ms);
    let hunt = Hunt::start(config, BrowserStorage::from_window(), view);
    HUNT.with(|cell| cell.replace(Some(hunt)));

    attach_answer_inputs(&doc)?;
    Ok(())
}

/// Landing primary action.
#[wasm_bindgen]
pub fn begin_hunt() {
    with_hunt(|hunt| hunt.begin());
}

#[wasm_bindgen]
pub fn check_answer(level: u8) {
    let Some(level) = Level::new(level) else {
        log::warn!("check_answer called for unknown level {level}");
        return;
    };
    let answer = input_value(&format!("answer{}", level.number()));
    with_hunt(|hunt| hunt.submit(level, &answer));
}

/// Reset without confirmation.
#[wasm_bindgen]
pub fn reset_progress() {
    with_hunt(|hunt| hunt.start_over());
}

#[wasm_bindgen]
pub fn generate_certificate() {
    let name = input_value("userName");
    let today = today();
    if let Some(Err(err)) = with_hunt(|hunt| hunt.generate_certificate(&name, today).map(|_| ())) {
        log::info!("certificate not generated: {err}");
    }
}

#[wasm_bindgen]
pub fn download_certificate() {
    let Some((certificate, config)) = with_hunt(|hunt| {
        hunt.certificate()
            .cloned()
            .map(|c| (c, hunt.config().clone()))
    })
    .flatten() else {
        log::warn!("no certificate to download");
        return;
    };
    let Some(doc) = document() else {
        return;
    };
    let target = doc
        .get_element_by_id("certificateContent")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let controls = DomControls::new(
        doc.query_selector(".certificate-actions")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
    );
    spawn_local(async move {
        let outcome = run_export(&certificate, target, &controls, &config).await;
        if let Err(err) = outcome {
            log::error!("Error generating certificate: {err}");
            alert(EXPORT_FAILED_MESSAGE);
        }
    });
}

async fn run_export(
    certificate: &Certificate,
    target: Option<HtmlElement>,
    controls: &DomControls,
    config: &HuntConfig,
) -> Result<(), String> {
    let element = target.ok_or_else(|| "certificate content not found".to_owned())?;
    let download = export_certificate(certificate, &Html2Canvas { element }, controls, config)
        .await
        .map_err(|e| e.to_string())?;
    trigger_download(&download).map_err(|e| js_error(&e))
}

fn init_logging(config: &HuntConfig) {
    static LOGGER: Once = Once::new();
    LOGGER.call_once(|| {
        let level = config.log_level();
        wasm_logger::init(wasm_logger::Config::new(level.unwrap_or(log::Level::Info)));
        log::info!("Logging initialized");
        if level.is_none() {
            log::warn!("unknown log level {:?}, using info", config.log_level);
        }
    });
}

fn install_shake_keyframes(doc: &Document) -> Result<(), JsValue> {
    if doc.get_element_by_id(SHAKE_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = doc.create_element("style")?;
    style.set_id(SHAKE_STYLE_ID);
    style.set_text_content(Some(SHAKE_KEYFRAMES));
    if let Some(head) = doc.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

// Enter in a level input submits that level; `Hunt` ignores inactive levels.
fn attach_answer_inputs(doc: &Document) -> Result<(), JsValue> {
    for level in Level::all() {
        let Some(input) = doc.get_element_by_id(&format!("answer{}", level.number())) else {
            log::warn!("no input for {level}");
            continue;
        };
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            if evt.key() == "Enter" {
                check_answer(level.number());
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn trigger_download(download: &Download) -> Result<(), JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let link: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    link.set_download(&download.file_name);
    link.set_href(&download.href);
    link.click();
    Ok(())
}

// --- DOM view -----------------------------------------------------------------

#[derive(Clone, Copy)]
enum LandingAction {
    Begin,
    StartOver,
}

pub struct DomView {
    document: Document,
    shake_ms: u32,
}

impl DomView {
    pub fn new(document: Document, shake_ms: u32) -> Self {
        Self { document, shake_ms }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("missing element #{id}");
        }
        el
    }

    fn input(&self, level: Level) -> Option<HtmlInputElement> {
        self.element(&format!("answer{}", level.number()))?
            .dyn_into()
            .ok()
    }

    fn append_button(
        &self,
        container: &Element,
        class: &str,
        label: &str,
        action: LandingAction,
    ) -> Result<(), JsValue> {
        let button: HtmlElement = self.document.create_element("button")?.dyn_into()?;
        button.set_class_name(class);
        button.style().set_property("margin-top", "1rem")?;
        let span = self.document.create_element("span")?;
        span.set_text_content(Some(label));
        button.append_child(&span)?;
        let onclick = Closure::wrap(Box::new(move || match action {
            LandingAction::Begin => begin_hunt(),
            LandingAction::StartOver => {
                let confirmed = window()
                    .and_then(|w| w.confirm_with_message(RESET_CONFIRM_MESSAGE).ok())
                    .unwrap_or(false);
                if confirmed {
                    reset_progress();
                }
            }
        }) as Box<dyn FnMut()>);
        button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
        container.append_child(&button)?;
        Ok(())
    }

    fn build_landing(&self, container: &Element, landing: Landing) -> Result<(), JsValue> {
        container.set_inner_html("");
        match landing {
            Landing::Fresh => {
                self.append_button(container, "btn-primary", "Begin", LandingAction::Begin)?;
            }
            Landing::Resume(level) => {
                let label = format!("Continue Journey (Level {})", level.number());
                self.append_button(container, "btn-primary", &label, LandingAction::Begin)?;
            }
            Landing::Finished => {
                let label = "View Your Certificate";
                self.append_button(container, "btn-primary", label, LandingAction::Begin)?;
            }
        }
        if landing.offers_start_over() {
            self.append_button(container, "btn-secondary", "Start Over", LandingAction::StartOver)?;
        }
        Ok(())
    }
}

impl HuntView for DomView {
    fn show_page(&mut self, page: Page) {
        // Deactivate everything first so two pages are never visible together.
        if let Ok(pages) = self.document.query_selector_all(".page") {
            for i in 0..pages.length() {
                if let Some(el) = pages.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    el.class_list().remove_1("active").ok();
                }
            }
        }
        if let Some(target) = self.element(&page.element_id()) {
            target.class_list().add_1("active").ok();
        }
        if let Some(level) = page.level() {
            if let Some(input) = self.input(level) {
                input.style().remove_property("border-color").ok();
            }
        }
        if let Some(win) = window() {
            win.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    fn render_landing(&mut self, landing: Landing) {
        let Some(container) = self.element("landingButtons") else {
            return;
        };
        if let Err(err) = self.build_landing(&container, landing) {
            log::warn!("landing buttons not rendered: {}", js_error(&err));
        }
    }

    fn show_message(&mut self, level: Level, message: Option<&str>) {
        if let Some(el) = self.element(&format!("error{}", level.number())) {
            el.set_text_content(Some(message.unwrap_or("")));
        }
    }

    fn mark_accepted(&mut self, level: Level) {
        if let Some(input) = self.input(level) {
            input.set_value("");
            input.style().set_property("border-color", "var(--gold)").ok();
        }
    }

    fn set_shaking(&mut self, level: Level, shaking: bool) {
        if let Some(input) = self.input(level) {
            let animation = if shaking {
                format!("shake {}ms", self.shake_ms)
            } else {
                String::new()
            };
            input.style().set_property("animation", &animation).ok();
        }
    }

    fn focus_input(&mut self, page: Page) {
        if let Some(input) = page.level().and_then(|level| self.input(level)) {
            input.focus().ok();
        }
    }

    fn show_certificate(&mut self, certificate: &Certificate) {
        if let Some(el) = self.element("certificateName") {
            el.set_text_content(Some(certificate.name()));
        }
        if let Some(el) = self.element("certificateDate") {
            el.set_text_content(Some(certificate.formatted_date()));
        }
    }

    fn clear_inputs(&mut self) {
        for level in Level::all() {
            if let Some(input) = self.input(level) {
                input.set_value("");
                let style = input.style();
                style.remove_property("border-color").ok();
                style.remove_property("animation").ok();
            }
        }
        if let Some(input) = self
            .element("userName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value("");
        }
        for id in ["certificateName", "certificateDate"] {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(""));
            }
        }
    }

    fn alert(&mut self, message: &str) {
        alert(message);
    }

    fn schedule(&mut self, timer: Scheduled) {
        let id = timer.id;
        let callback = Closure::once_into_js(move || {
            with_hunt(|hunt| hunt.fire(id));
        });
        let delay = i32::try_from(timer.delay_ms).unwrap_or(i32::MAX);
        let armed = window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        });
        if !matches!(armed, Some(Ok(_))) {
            log::warn!("timer {} could not be armed", id.raw());
        }
    }
}

// --- Export collaborators -----------------------------------------------------

/// `.certificate-actions`, hidden by inline `display: none` during capture.
pub struct DomControls {
    element: Option<HtmlElement>,
    original_display: RefCell<String>,
}

impl DomControls {
    pub fn new(element: Option<HtmlElement>) -> Self {
        Self {
            element,
            original_display: RefCell::new(String::new()),
        }
    }
}

impl CaptureControls for DomControls {
    fn hide(&self) {
        if let Some(el) = &self.element {
            let style = el.style();
            let display = style.get_property_value("display").unwrap_or_default();
            *self.original_display.borrow_mut() = display;
            style.set_property("display", "none").ok();
        }
    }

    fn restore(&self) {
        if let Some(el) = &self.element {
            let style = el.style();
            let original = self.original_display.borrow();
            if original.is_empty() {
                style.remove_property("display").ok();
            } else {
                style.set_property("display", &original).ok();
            }
        }
    }
}

#[wasm_bindgen]
extern "C" {
    // Provided by the page (<script src="html2canvas.min.js">).
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Result<Promise, JsValue>;
}

struct Html2Canvas {
    element: HtmlElement,
}

impl Rasterizer for Html2Canvas {
    async fn rasterize(&self, options: &RenderOptions) -> Result<RasterImage, ExportError> {
        let render_err = |e: JsValue| ExportError::Render(js_error(&e));
        let opts = Object::new();
        let set = |key: &str, value: JsValue| Reflect::set(&opts, &JsValue::from_str(key), &value);
        set("backgroundColor", JsValue::from_str(&options.background_color))
            .and_then(|_| set("scale", JsValue::from_f64(options.scale)))
            .and_then(|_| set("logging", JsValue::FALSE))
            .and_then(|_| set("useCORS", JsValue::TRUE))
            .map_err(render_err)?;

        let promise = html2canvas(&self.element, &opts).map_err(render_err)?;
        let canvas: HtmlCanvasElement = JsFuture::from(promise)
            .await
            .map_err(render_err)?
            .dyn_into()
            .map_err(render_err)?;
        let href = canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| ExportError::Encode(js_error(&e)))?;
        Ok(RasterImage { href })
    }
}

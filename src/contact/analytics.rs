use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::error::AnalyticsError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalyticsEvent {
    FormSubmission { service: String, budget: String },
}

/// Fire-and-forget tracking. Callers never wait on it and never fail because of it.
pub trait Analytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = gtag)]
    fn gtag(command: &str, name: &str, params: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = fbq)]
    fn fbq(command: &str, name: &str, params: &JsValue) -> Result<(), JsValue>;
}

#[derive(Serialize)]
struct GtagEvent<'a> {
    event_category: &'a str,
    event_label: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct PixelLead<'a> {
    content_name: &'a str,
    content_category: &'a str,
}

/// Google Analytics and Facebook Pixel, whichever the page loaded.
pub struct BrowserAnalytics;

impl BrowserAnalytics {
    fn is_loaded(global: &str) -> bool {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(global)).ok())
            .is_some_and(|f| f.is_function())
    }

    fn call(
        global: &'static str,
        invoke: impl FnOnce(&JsValue) -> Result<(), JsValue>,
        params: &impl Serialize,
    ) -> Result<(), AnalyticsError> {
        if !Self::is_loaded(global) {
            return Err(AnalyticsError::Unavailable(global));
        }
        let params = serde_wasm_bindgen::to_value(params)
            .map_err(|e| AnalyticsError::Failed(e.to_string()))?;
        invoke(&params).map_err(|e| AnalyticsError::Failed(format!("{}: {:?}", global, e)))
    }
}

impl Analytics for BrowserAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        match event {
            AnalyticsEvent::FormSubmission { service, budget } => {
                let ga = Self::call(
                    "gtag",
                    |params| gtag("event", "form_submission", params),
                    &GtagEvent {
                        event_category: "Contact",
                        event_label: service,
                        value: budget,
                    },
                );
                let pixel = Self::call(
                    "fbq",
                    |params| fbq("track", "Lead", params),
                    &PixelLead {
                        content_name: service,
                        content_category: "Contact Form",
                    },
                );
                // One tracker is enough
                ga.or(pixel)
            }
        }
    }
}

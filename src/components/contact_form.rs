use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::Utc;
use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::{
    HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::prelude::*;

use crate::config::ContactConfig;
use crate::contact::analytics::BrowserAnalytics;
use crate::contact::controller::ContactFormController;
use crate::contact::draft::{BrowserStorage, DraftStore};
use crate::contact::error::SubmissionError;
use crate::contact::fields::{Field, FieldState, SelectOption, BUDGETS, SERVICES};
use crate::contact::transport::{EndpointResponse, SubmissionTransport, Web3FormsTransport};

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    #[prop_or_default]
    pub config: ContactConfig,
}

pub enum ContactFormMsg {
    Input(Field, String),
    Blur(Field),
    Submit,
    Submitted(Result<EndpointResponse, SubmissionError>),
    DismissNotice,
    SendAnother,
}

pub struct ContactForm {
    controller: ContactFormController<BrowserStorage>,
    transport: Rc<dyn SubmissionTransport>,
    field_refs: BTreeMap<Field, NodeRef>,
    form_ref: NodeRef,
    success_ref: NodeRef,
    notice_timeout: Option<Timeout>,
    scroll_to: Option<NodeRef>,
}

fn scroll_into_center(element: &HtmlElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

impl ContactForm {
    fn focus_field(&self, field: Field) {
        let element = self
            .field_refs
            .get(&field)
            .and_then(|r| r.cast::<HtmlElement>());
        if let Some(element) = element {
            scroll_into_center(&element);
            let _ = element.focus();
        }
    }

    fn field_classes(&self, field: Field) -> Classes {
        classes!("form-control", self.controller.error(field).is_some().then_some("error"))
    }

    fn error_slot(&self, field: Field) -> Html {
        let message = self
            .controller
            .field_state(field)
            .and_then(FieldState::error_message);
        match message {
            Some(message) => html! {
                <span class="field-error" id={field.error_slot_id()} role="alert">
                    { message }
                </span>
            },
            None => html! {
                <span class="field-error" id={field.error_slot_id()} style="display: none;"></span>
            },
        }
    }

    fn text_input(
        &self,
        ctx: &Context<Self>,
        field: Field,
        label: &str,
        kind: &str,
        placeholder: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, input.value())
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(field));

        html! {
            <div class="form-group">
                <label for={field.id()}>{ label.to_string() }</label>
                <input
                    id={field.id()}
                    name={field.id()}
                    type={kind.to_string()}
                    placeholder={placeholder.to_string()}
                    class={self.field_classes(field)}
                    value={self.controller.values().get(field).to_string()}
                    ref={self.field_refs[&field].clone()}
                    {oninput}
                    {onblur}
                />
                { self.error_slot(field) }
            </div>
        }
    }

    fn select(
        &self,
        ctx: &Context<Self>,
        field: Field,
        label: &str,
        prompt: &str,
        options: &[SelectOption],
    ) -> Html {
        let onchange = ctx.link().callback(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, select.value())
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(field));
        let current = self.controller.values().get(field);

        html! {
            <div class="form-group">
                <label for={field.id()}>{ label.to_string() }</label>
                <select
                    id={field.id()}
                    name={field.id()}
                    class={self.field_classes(field)}
                    ref={self.field_refs[&field].clone()}
                    {onchange}
                    {onblur}
                >
                    <option value="" selected={current.is_empty()}>{ prompt.to_string() }</option>
                    { for options.iter().map(|option| html! {
                        <option value={option.value} selected={current == option.value}>
                            { option.label }
                        </option>
                    }) }
                </select>
                { self.error_slot(field) }
            </div>
        }
    }

    fn message_input(&self, ctx: &Context<Self>) -> Html {
        let field = Field::Message;
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            ContactFormMsg::Input(field, input.value())
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| ContactFormMsg::Blur(field));

        html! {
            <div class="form-group">
                <label for={field.id()}>{ "Project details" }</label>
                <textarea
                    id={field.id()}
                    name={field.id()}
                    rows="5"
                    placeholder="Tell me about your project..."
                    class={self.field_classes(field)}
                    value={self.controller.values().get(field).to_string()}
                    ref={self.field_refs[&field].clone()}
                    {oninput}
                    {onblur}
                />
                { self.error_slot(field) }
            </div>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactFormMsg;
    type Properties = ContactFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let drafts = DraftStore::new(BrowserStorage::local(), config.draft_key.clone());
        let controller = ContactFormController::new(config, drafts, Rc::new(BrowserAnalytics));

        Self {
            controller,
            transport: Rc::new(Web3FormsTransport::new(config.endpoint.clone())),
            field_refs: Field::ALL.iter().map(|field| (*field, NodeRef::default())).collect(),
            form_ref: NodeRef::default(),
            success_ref: NodeRef::default(),
            notice_timeout: None,
            scroll_to: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactFormMsg::Input(field, value) => {
                self.controller.on_input(field, value);
                true
            }
            ContactFormMsg::Blur(field) => {
                self.controller.on_blur(field);
                true
            }
            ContactFormMsg::Submit => match self.controller.begin_submit(Utc::now()) {
                Ok(payload) => {
                    self.notice_timeout = None;
                    let transport = self.transport.clone();
                    ctx.link().send_future(async move {
                        ContactFormMsg::Submitted(transport.send(&payload).await)
                    });
                    true
                }
                Err(SubmissionError::Invalid { field }) => {
                    self.focus_field(field);
                    true
                }
                Err(e) => {
                    debug!("Submit not started: {}", e);
                    false
                }
            },
            ContactFormMsg::Submitted(outcome) => {
                if self.controller.finish_submit(outcome).is_ok() {
                    self.scroll_to = Some(self.success_ref.clone());
                } else if let Some(notice) = self.controller.notice() {
                    let link = ctx.link().clone();
                    let timeout = Timeout::new(notice.dismiss_after_ms, move || {
                        link.send_message(ContactFormMsg::DismissNotice);
                    });
                    self.notice_timeout = Some(timeout);
                }
                true
            }
            ContactFormMsg::DismissNotice => {
                self.notice_timeout = None;
                self.controller.dismiss_notice();
                true
            }
            ContactFormMsg::SendAnother => {
                self.notice_timeout = None;
                self.controller.reset();
                self.scroll_to = Some(self.form_ref.clone());
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(element) = self.scroll_to.take().and_then(|r| r.cast::<HtmlElement>()) {
            scroll_into_center(&element);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactFormMsg::Submit
        });
        let dismiss = ctx.link().callback(|_: MouseEvent| ContactFormMsg::DismissNotice);
        let send_another = ctx.link().callback(|_: MouseEvent| ContactFormMsg::SendAnother);
        let loading = self.controller.loading();
        let wrapper = classes!(
            "contact-form-wrapper",
            format!("is-{}", self.controller.state())
        );

        html! {
            <div class={wrapper}>
                if self.controller.form_visible() {
                    <form id="contactForm" class="contact-form" ref={self.form_ref.clone()} {onsubmit}>
                        if let Some(notice) = self.controller.notice() {
                            <div class="form-error-message" role="alert">
                                <span>{ notice.message.clone() }</span>
                                <button type="button" class="form-error-dismiss" aria-label="Dismiss" onclick={dismiss}>
                                    { "✕" }
                                </button>
                            </div>
                        }
                        <div class="form-row">
                            { self.text_input(ctx, Field::Name, "Your name", "text", "John Doe") }
                            { self.text_input(ctx, Field::Email, "Email address", "text", "john@example.com") }
                        </div>
                        <div class="form-row">
                            { self.select(ctx, Field::Service, "Service needed", "Select a service", SERVICES) }
                            { self.select(ctx, Field::Budget, "Budget range", "Select your budget", BUDGETS) }
                        </div>
                        { self.message_input(ctx) }
                        <button type="submit" class="btn btn-primary btn-submit" disabled={!self.controller.submit_enabled()}>
                            if loading {
                                <span class="btn-loading" style="display: inline-flex;">
                                    <span class="loading-spinner"></span>
                                    { "Sending..." }
                                </span>
                            } else {
                                <span class="btn-text">{ "Send Message" }</span>
                            }
                        </button>
                    </form>
                }
                if self.controller.success_visible() {
                    <div id="formSuccess" class="form-success" style="display: flex;" ref={self.success_ref.clone()}>
                        <div class="success-icon">{ "✓" }</div>
                        <h3>{ "Message sent!" }</h3>
                        <p>{ "Thanks for reaching out. I'll get back to you within 24 hours." }</p>
                        <button id="sendAnother" type="button" class="btn btn-outline" onclick={send_another}>
                            { "Send another message" }
                        </button>
                    </div>
                }
            </div>
        }
    }
}

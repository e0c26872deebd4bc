use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::contact_form::ContactForm;
use crate::contact::fields::SERVICES;

#[function_component]
pub fn Home() -> Html {
    html! {
        <>
            <section id="home" class="hero">
                <div class="container hero-content">
                    <h1 class="hero-title">
                        {"I build "}<span class="highlight">{"Websites"}</span>
                        {" that grow your business"}
                    </h1>
                    <p class="hero-subtitle">
                        {"Fast, accessible and good looking sites for small businesses and startups."}
                    </p>
                    <a href="#contact" class="btn btn-primary">{"Start a project"}</a>
                </div>
            </section>

            <section id="services" class="services">
                <div class="container">
                    <h2 class="section-title">{"Services"}</h2>
                    <div class="services-grid">
                        { for SERVICES.iter().map(|service| html! {
                            <div class="service-card" key={service.value}>
                                <h3>{ service.label }</h3>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section id="contact" class="contact">
                <div class="container">
                    <h2 class="section-title">{"Let's work together"}</h2>
                    <p class="section-subtitle">
                        {"Tell me a little about your project and I'll reply within a day."}
                    </p>
                    <ContactForm />
                </div>
            </section>
        </>
    }
}

#[function_component]
pub fn NotFound() -> Html {
    html! {
        <section class="not-found">
            <div class="container">
                <h1>{"404"}</h1>
                <p>{"This page doesn't exist."}</p>
                <Link<Route> to={Route::Home} classes="btn btn-primary">
                    {"Back home"}
                </Link<Route>>
            </div>
        </section>
    }
}

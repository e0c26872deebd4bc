use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod contact {
    pub mod analytics;
    pub mod controller;
    pub mod draft;
    pub mod error;
    pub mod fields;
    pub mod transport;
}
mod components {
    pub mod contact_form;
}
mod pages {
    pub mod home;
}

use pages::home::{Home, NotFound};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


#[function_component(Nav)]
pub fn nav() -> Html {
    html! {
        <nav id="navbar" class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Arjun Digital"}
                </Link<Route>>
                <div class="nav-right">
                    <a href="#services" class="nav-link">{"Services"}</a>
                    <a href="#contact" class="nav-link nav-cta">{"Contact"}</a>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::get_log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

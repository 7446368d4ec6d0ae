use yew::prelude::*;
use yew_router::prelude::*;
use yew_hooks::use_click_away;
use log::info;
use web_sys::{Event, MouseEvent};

mod behaviors;
mod config;
mod dom;
mod error;
mod layout;
mod sticky_cta;
mod timers;
mod anchor_nav {
    pub mod fade;
    pub mod label;
    pub mod navigator;
}
mod pages {
    pub mod card;
    pub mod faq;
}

use pages::card::{CardPage, NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Card,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Card => {
            info!("Rendering card page");
            html! { <CardPage /> }
        },
        Route::NotFound => {
            info!("Rendering not found page");
            html! { <NotFound /> }
        },
    }
}

const MENU_LINKS: &[(&str, &str)] = &[
    ("#about", "Card benefits"),
    ("#fees", "Fees & charges"),
    ("#deals", "Deals"),
    ("#faq", "FAQ"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let controls = use_node_ref();

    // Any click outside the hamburger and the menu closes it.
    {
        let menu_open = menu_open.clone();
        use_click_away(controls.clone(), move |_: Event| {
            menu_open.set(false);
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <a href="/" class="nav-logo">{"Everyday Bank"}</a>
                <div class="nav-controls" ref={controls}>
                    <button
                        id="navbarToggle"
                        class="burger-menu"
                        aria-label="Menu"
                        onclick={toggle_menu}
                    >
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                    <div id="mobileMenu" class={classes!("mobile-menu", (*menu_open).then(|| "active"))}>
                        {
                            MENU_LINKS.iter().map(|(href, text)| html! {
                                <a href={*href} class="nav-link" onclick={close_menu.clone()}>{*text}</a>
                            }).collect::<Html>()
                        }
                    </div>
                </div>
            </div>
            <style>
                {r#"
                .top-nav {
                    position: relative;
                    background: #ffffff;
                    border-bottom: 1px solid #e3e6ea;
                    z-index: 30;
                }

                .nav-content {
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 0 1.25rem;
                    height: 64px;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                }

                .nav-logo {
                    font-weight: 700;
                    color: #d0021b;
                    text-decoration: none;
                }

                .nav-controls {
                    position: relative;
                }

                .burger-menu {
                    display: flex;
                    flex-direction: column;
                    gap: 5px;
                    background: none;
                    border: none;
                    padding: 8px;
                    cursor: pointer;
                }

                .burger-menu span {
                    width: 22px;
                    height: 2px;
                    background: #1a1a1a;
                }

                .mobile-menu {
                    display: none;
                    position: absolute;
                    right: 0;
                    top: calc(100% + 12px);
                    min-width: 200px;
                    background: #ffffff;
                    border: 1px solid #e3e6ea;
                    border-radius: 8px;
                    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
                    flex-direction: column;
                }

                .mobile-menu.active {
                    display: flex;
                }

                .nav-link {
                    padding: 0.85rem 1rem;
                    color: #1a1a1a;
                    text-decoration: none;
                }

                .nav-link:hover {
                    background: #f5f6f8;
                }
                "#}
            </style>
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
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting card page");
    yew::Renderer::<App>::new().render();
}

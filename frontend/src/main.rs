use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod config;
mod notice;
mod poll;
mod results;
mod styles;

use crate::{poll::Poll, results::ResultsPage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/results")] Results,
    #[not_found]
    #[at("/404")] NotFound,
}

fn nav_link_classes(active: bool) -> Classes {
    classes!(
        "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
        "transition-colors", "duration-200", "ease-in-out",
        "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
        active.then_some("text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900")
    )
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Home} classes={nav_link_classes(current_route == Some(Route::Home))}>
                    {"Vote"}
                </Link<Route>>
                <Link<Route> to={Route::Results} classes={nav_link_classes(current_route == Some(Route::Results))}>
                    {"Results"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-gray-900">
                <Navigation />
                <div class="pt-16">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Poll /> },
        Route::Results => html! { <ResultsPage /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

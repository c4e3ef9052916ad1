//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::use_session;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = use_session();
    let (menu_open, set_menu_open) = signal(false);

    view! {
        <nav class="nav-top">
            <A href="/" attr:class="nav-brand">"Got Blood?"</A>
            <div class="nav-links">
                <A href="/">"Home"</A>
                <A href="/filter">"Data Filtration"</A>
                <A href="/map">"Map"</A>
                <A href="/statistics">"Statistics"</A>
                <A href="/dashboard">"Dashboard"</A>
                <div
                    class="nav-dropdown"
                    class:open=move || menu_open.get()
                    on:mouseleave=move |_| set_menu_open.set(false)
                >
                    <button type="button" class="nav-dropdown-toggle" on:click=move |_| set_menu_open.update(|v| *v = !*v)>
                        "Sign up + Login"
                    </button>
                    <div class="nav-dropdown-menu" on:click=move |_| set_menu_open.set(false)>
                        <A href="/hlogin">"Hospital Login"</A>
                        <A href="/hsign">"Hospital Sign Up"</A>
                        <A href="/dsign">"Donor Sign Up"</A>
                        <A href="/signup">"Donation Alerts"</A>
                    </div>
                </div>
            </div>
            <Show when=move || session.is_logged_in()>
                <span class="nav-session">
                    {move || session.session.with(|s| s.as_ref().map(|s| s.hospital_name.clone()).unwrap_or_default())}
                </span>
                <button type="button" class="nav-logout" on:click=move |_| session.logout()>"Log Out"</button>
            </Show>
        </nav>
    }
}

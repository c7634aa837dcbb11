//! Auth Panel Component
//!
//! Username/password form with login and register buttons.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn AuthPanel() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let login = move |_| {
        let (user, pass) = (username.get(), password.get());
        ctx.dispatch(move |client| client.login(&user, &pass));
    };
    let register = move |_| {
        let (user, pass) = (username.get(), password.get());
        ctx.dispatch(move |client| client.register(&user, &pass));
    };

    view! {
        <section class="auth-section">
            <input
                type="text"
                placeholder="Username"
                prop:value=move || username.get()
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="button" on:click=login>"Login"</button>
            <button type="button" on:click=register>"Register"</button>
            <p class="auth-message">
                {move || ctx.app.with(|client| client.auth_message().map(str::to_string))}
            </p>
        </section>
    }
}

//! Persistent top bar with role-based navigation.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::util::nav::nav_links;
use crate::util::storage::LocalStore;

/// Site header. Hidden until auth has been restored so guest links never
/// flash for a signed-in user.
#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let menu_open = RwSignal::new(false);

    let links = move || {
        nav_links(&auth.get())
            .iter()
            .map(|link| {
                view! {
                    <a class="header__link" href=link.href on:click=move |_| menu_open.set(false)>
                        {link.label}
                    </a>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || !auth.with(|a| a.loading)>
            <header class="header">
                <a class="header__brand" href="/">
                    "Doc"
                    <span class="header__brand-accent">"Book"</span>
                </a>
                <button
                    class="header__menu-toggle"
                    aria-label="Toggle navigation"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "\u{2715}" } else { "\u{2630}" }}
                </button>
                <nav class="header__nav" class:header__nav--open=move || menu_open.get()>
                    {links}
                    <Show when=move || auth.with(|a| a.authenticated)>
                        <span class="header__user">{move || auth.with(AuthState::display_name)}</span>
                        // The router intercepts the anchor; the handler clears
                        // the session first.
                        <a
                            class="btn btn--danger header__logout"
                            href="/login"
                            on:click=move |_| {
                                menu_open.set(false);
                                auth.update(|a| a.logout(&LocalStore));
                                log::info!("logged out");
                            }
                        >
                            "Logout"
                        </a>
                    </Show>
                </nav>
            </header>
        </Show>
    }
}

//! Floating assistant chat, mounted once under the router.

use leptos::prelude::*;

use crate::state::chat::{ChatState, Sender, render_markdown_html};

#[component]
pub fn ChatWidget() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();

    let send = move || {
        let mut started = None;
        chat.update(|c| started = c.begin_send());
        let Some((placeholder, request)) = started else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let client = crate::net::http::browser_client();
            let result = crate::net::api::send_chat(&*client, &request).await;
            chat.update(|c| c.finish_send(placeholder, result));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (placeholder, request);
    };

    let messages = move || {
        chat.get()
            .messages
            .into_iter()
            .map(|message| match message.sender {
                Sender::User => view! { <div class="chat__bubble chat__bubble--user">{message.text}</div> }.into_any(),
                Sender::Bot if message.pending => {
                    view! { <div class="chat__bubble chat__bubble--bot chat__bubble--pending">{message.text}</div> }
                        .into_any()
                }
                Sender::Bot => {
                    let html = render_markdown_html(&message.text);
                    view! { <div class="chat__bubble chat__bubble--bot" inner_html=html></div> }.into_any()
                }
            })
            .collect_view()
    };

    view! {
        <div class="chat">
            <Show when=move || chat.with(|c| c.open)>
                <section class="chat__panel">
                    <header class="chat__header">
                        <span>"DocBook Assistant"</span>
                        <button class="chat__close" aria-label="Close chat" on:click=move |_| chat.update(ChatState::toggle)>
                            "\u{2715}"
                        </button>
                    </header>
                    <div class="chat__messages">{messages}</div>
                    <div class="chat__composer">
                        <input
                            class="chat__input"
                            type="text"
                            placeholder="Type your message..."
                            prop:value=move || chat.with(|c| c.input.clone())
                            on:input=move |ev| chat.update(|c| c.input = event_target_value(&ev))
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button class="btn chat__send" on:click=move |_| send()>
                            "Send"
                        </button>
                    </div>
                </section>
            </Show>
            <button class="chat__toggle" aria-label="Open chat" on:click=move |_| chat.update(ChatState::toggle)>
                "\u{1f4ac}"
            </button>
        </div>
    }
}

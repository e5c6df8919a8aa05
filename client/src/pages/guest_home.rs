//! Marketing landing for signed-out visitors.

use leptos::prelude::*;

const SPECIALTIES: [&str; 8] = [
    "General Physician",
    "Dermatologist",
    "Gynecologist",
    "Pediatrician",
    "Cardiologist",
    "Orthopedic",
    "Dentist",
    "Neurologist",
];

const STEPS: [(&str, &str); 3] = [
    ("Find a doctor", "Search verified specialists by name or specialty."),
    ("Pick a slot", "See real availability and book a time that suits you."),
    ("Get care", "Track upcoming visits and ask the assistant anything."),
];

#[component]
pub fn GuestHome() -> impl IntoView {
    view! {
        <div class="guest-home">
            <section class="hero">
                <h1 class="hero__title">"Your health, booked in minutes"</h1>
                <p class="hero__subtitle">
                    "Consult trusted doctors, manage appointments, and get quick answers from our assistant."
                </p>
                <div class="hero__actions">
                    <a class="btn btn--primary" href="/register">
                        "Get Started"
                    </a>
                    <a class="btn" href="/login">
                        "Login"
                    </a>
                </div>
            </section>

            <section class="guest-home__steps">
                <h2>"How it works"</h2>
                <div class="steps">
                    {STEPS
                        .iter()
                        .map(|(title, body)| {
                            view! {
                                <div class="step">
                                    <h3>{*title}</h3>
                                    <p>{*body}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="guest-home__specialties">
                <h2>"Popular Specialties"</h2>
                <div class="specialties">
                    {SPECIALTIES.iter().map(|name| view! { <div class="specialty">{*name}</div> }).collect_view()}
                </div>
            </section>
        </div>
    }
}

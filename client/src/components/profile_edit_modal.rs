//! Profile edit modal for doctors and patients.
//!
//! Each input is its own signal; on save they are folded back into a
//! [`ProfileForm`] so the role-specific PATCH body is built in one place.

use leptos::prelude::*;

use crate::components::form_field::TextField;
use crate::net::types::{Profile, ProfileResponse};
use crate::state::profile::{DoctorForm, PatientForm, ProfileForm};

const UPDATE_FAILED_MESSAGE: &str = "Error updating profile";

#[component]
pub fn ProfileEditModal(response: ProfileResponse, on_close: Callback<()>, on_saved: Callback<Profile>) -> impl IntoView {
    let (is_doctor, doctor, patient) = match ProfileForm::from_response(&response) {
        ProfileForm::Doctor(form) => (true, form, PatientForm::default()),
        ProfileForm::Patient(form) => (false, DoctorForm::default(), form),
    };

    let clinic_name = RwSignal::new(doctor.clinic_name);
    let clinic_address = RwSignal::new(doctor.clinic_address);
    let experience_years = RwSignal::new(doctor.experience_years);
    let consultation_fee = RwSignal::new(doctor.consultation_fee);
    let description = RwSignal::new(doctor.description);

    let name = RwSignal::new(patient.name);
    let gender = RwSignal::new(patient.gender);
    let address = RwSignal::new(patient.address);
    let medical_history = RwSignal::new(patient.medical_history);
    let blood_group = RwSignal::new(patient.blood_group);
    let emergency_contact = RwSignal::new(patient.emergency_contact);

    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let collect = move || {
        if is_doctor {
            ProfileForm::Doctor(DoctorForm {
                clinic_name: clinic_name.get_untracked(),
                clinic_address: clinic_address.get_untracked(),
                experience_years: experience_years.get_untracked(),
                consultation_fee: consultation_fee.get_untracked(),
                description: description.get_untracked(),
            })
        } else {
            ProfileForm::Patient(PatientForm {
                name: name.get_untracked(),
                gender: gender.get_untracked(),
                address: address.get_untracked(),
                medical_history: medical_history.get_untracked(),
                blood_group: blood_group.get_untracked(),
                emergency_contact: emergency_contact.get_untracked(),
            })
        }
    };

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifetime::Liveness::for_owner();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let fields = match collect().fields() {
            Ok(fields) => fields,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::update_profile(&*client, &fields).await;
                if !alive.is_alive() {
                    return;
                }
                saving.set(false);
                match result {
                    Ok(profile) => on_saved.run(profile),
                    Err(e) => {
                        log::warn!("profile update failed: {e}");
                        error.set(Some(e.user_message(UPDATE_FAILED_MESSAGE)));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (fields, on_saved);
    };

    let inputs = if is_doctor {
        view! {
            <TextField label="Clinic name" value=clinic_name />
            <TextField label="Clinic address" value=clinic_address />
            <TextField label="Experience (years)" value=experience_years kind="number" />
            <TextField label="Consultation fee" value=consultation_fee kind="number" />
            <TextField label="About" value=description multiline=true />
        }
        .into_any()
    } else {
        view! {
            <TextField label="Name" value=name />
            <TextField label="Gender" value=gender />
            <TextField label="Address" value=address />
            <TextField label="Medical history" value=medical_history multiline=true />
            <TextField label="Blood group" value=blood_group />
            <TextField label="Emergency contact" value=emergency_contact kind="tel" />
        }
        .into_any()
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <form class="dialog dialog--profile" on:click=move |ev| ev.stop_propagation() on:submit=on_submit>
                <h2>"Edit Profile"</h2>
                {inputs}
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

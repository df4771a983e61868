use leptos::prelude::*;
use plantguard::route::AppRoute;

use crate::auth::use_auth;
use crate::components::icons::{Leaf, ShieldCheck, Upload};
use crate::web::router::Link;

#[component]
pub fn LandingPage() -> impl IntoView {
    let record = use_auth().record;
    let cta = move || {
        if record.get().otp_verified() {
            (AppRoute::Dashboard, "Go to Dashboard")
        } else {
            (AppRoute::Signup, "Get Started")
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <div class="navbar bg-base-100 shadow px-6">
                <div class="flex-1 gap-2">
                    <Leaf attr:class="h-6 w-6 text-primary" />
                    <span class="text-xl font-bold">"PlantGuard"</span>
                </div>
                <div class="flex-none gap-2">
                    <Link to=AppRoute::Login class="btn btn-ghost">"Login"</Link>
                    <Link to=AppRoute::Signup class="btn btn-primary">"Sign Up"</Link>
                </div>
            </div>

            <div class="hero flex-1">
                <div class="hero-content text-center">
                    <div class="max-w-2xl space-y-6">
                        <h1 class="text-5xl font-bold">"Detect plant diseases early"</h1>
                        <p class="text-lg text-base-content/70">
                            "Upload a photo of a pepper, potato or tomato leaf and get an instant diagnosis from our classification model."
                        </p>
                        <div class="flex justify-center gap-6 text-sm text-base-content/70">
                            <span class="flex items-center gap-2"><Upload attr:class="h-4 w-4 text-primary" />"Upload or pick a saved image"</span>
                            <span class="flex items-center gap-2"><ShieldCheck attr:class="h-4 w-4 text-primary" />"Protected with two-factor login"</span>
                        </div>
                        {move || {
                            let (route, label) = cta();
                            view! { <Link to=route class="btn btn-primary btn-lg">{label}</Link> }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

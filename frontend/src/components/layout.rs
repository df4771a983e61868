//! 仪表盘布局：侧边栏、用户资料弹窗与登出

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::flow;
use plantguard::forms::parse_phone;
use plantguard::route::AppRoute;
use plantguard::shared::UserProfile;
use plantguard::shared::date::format_display;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::notify::use_notifier;
use crate::organizer::use_organizer;
use crate::web::router::{Link, use_router};

const MENU: [(AppRoute, &str); 2] = [
    (AppRoute::Dashboard, "Dashboard"),
    (AppRoute::SavedImages, "Saved Images"),
];

#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let organizer = use_organizer();
    let router = use_router();
    let notifier = use_notifier();

    let (collapsed, set_collapsed) = signal(false);
    let (profile_open, set_profile_open) = signal(false);

    // 资料按需加载，已缓存时不会发请求
    {
        let api = auth.api.clone();
        spawn_local(async move {
            if let Err(e) = flow::load_profile(&*api).await {
                plantguard::log_warn!("[Layout] Failed to load profile: {}", e);
            }
        });
    }

    let on_logout = {
        let api = auth.api.clone();
        let store = organizer.store.clone();
        move |_| {
            let api = api.clone();
            let store = store.clone();
            spawn_local(async move {
                let next = flow::logout(&*api, &store).await;
                notifier.success("Logged out successfully");
                router.navigate_to(next);
            });
        }
    };

    let record = auth.record;
    let initials = move || {
        record
            .get()
            .user_profile
            .map(|p| p.initials())
            .unwrap_or_else(|| "?".to_string())
    };
    let current = router.current_route();

    view! {
        <div class="min-h-screen bg-base-200 flex font-sans">
            <aside class=move || {
                if collapsed.get() {
                    "w-20 bg-base-100 shadow-xl flex flex-col transition-all"
                } else {
                    "w-64 bg-base-100 shadow-xl flex flex-col transition-all"
                }
            }>
                <div class="flex items-center gap-2 p-4">
                    <Leaf attr:class="h-7 w-7 text-primary" />
                    <Show when=move || !collapsed.get()>
                        <span class="text-xl font-bold">"PlantGuard"</span>
                    </Show>
                </div>
                <ul class="menu flex-1 gap-1">
                    {MENU
                        .into_iter()
                        .map(|(route, label)| {
                            view! {
                                <li>
                                    <Link
                                        to=route
                                        class=if current.get_untracked() == route { "active" } else { "" }
                                    >
                                        {match route {
                                            AppRoute::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
                                            _ => view! { <ImageIcon attr:class="h-5 w-5" /> }.into_any(),
                                        }}
                                        <Show when=move || !collapsed.get()>
                                            <span>{label}</span>
                                        </Show>
                                    </Link>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="p-4 flex flex-col gap-2">
                    <button class="btn btn-ghost btn-sm" on:click=move |_| set_collapsed.update(|c| *c = !*c)>
                        {move || if collapsed.get() {
                            view! { <ChevronRight attr:class="h-4 w-4" /> }.into_any()
                        } else {
                            view! { <ChevronLeft attr:class="h-4 w-4" /> }.into_any()
                        }}
                    </button>
                    <button class="btn btn-outline btn-error btn-sm gap-2" on:click=on_logout>
                        <LogOut attr:class="h-4 w-4" />
                        <Show when=move || !collapsed.get()>"Logout"</Show>
                    </button>
                </div>
            </aside>

            <div class="flex-1 flex flex-col min-w-0">
                <div class="navbar bg-base-100 shadow px-6">
                    <div class="flex-1"></div>
                    <button
                        class="btn btn-circle btn-primary"
                        title="Profile"
                        on:click=move |_| set_profile_open.set(true)
                    >
                        {initials}
                    </button>
                </div>
                <main class="p-4 md:p-8 flex-1">{children()}</main>
            </div>

            <Show when=move || profile_open.get()>
                <ProfileModal on_close=move || set_profile_open.set(false) />
            </Show>
        </div>
    }
}

/// 用户资料弹窗；编辑只更新本地缓存
#[component]
fn ProfileModal(on_close: impl Fn() + Clone + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let record = auth.record;

    let (editing, set_editing) = signal(false);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());

    let start_edit = move |profile: &UserProfile| {
        first_name.set(profile.first_name.clone());
        last_name.set(profile.last_name.clone());
        phone.set(profile.phone_no.to_string());
        set_editing.set(true);
    };

    let on_save = {
        let session = auth.session().clone();
        move |_| {
            let Some(mut profile) = record.get_untracked().user_profile else {
                return;
            };
            let phone_no = match parse_phone(&phone.get_untracked()) {
                Ok(n) => n,
                Err(e) => {
                    notifier.client_error(&e);
                    return;
                }
            };
            profile.first_name = first_name.get_untracked().trim().to_string();
            profile.last_name = last_name.get_untracked().trim().to_string();
            profile.phone_no = phone_no;
            session.set_user_profile(profile);
            set_editing.set(false);
            notifier.success("Profile updated successfully!");
        }
    };

    let close = on_close.clone();
    view! {
        <div class="modal modal-open">
            <div class="modal-box">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-lg font-semibold">"Profile"</h2>
                    <button class="btn btn-ghost btn-sm btn-square" on:click=move |_| close()>
                        <X attr:class="h-4 w-4" />
                    </button>
                </div>
                {move || match record.get().user_profile {
                    None => view! {
                        <div class="flex justify-center py-8">
                            <span class="loading loading-spinner loading-md"></span>
                        </div>
                    }.into_any(),
                    Some(profile) if editing.get() => {
                        let on_save = on_save.clone();
                        view! {
                            <div class="space-y-3">
                                <input class="input input-bordered w-full" prop:value=first_name
                                    on:input=move |ev| first_name.set(event_target_value(&ev)) />
                                <input class="input input-bordered w-full" prop:value=last_name
                                    on:input=move |ev| last_name.set(event_target_value(&ev)) />
                                <input class="input input-bordered w-full" prop:value=phone
                                    on:input=move |ev| phone.set(event_target_value(&ev)) />
                                <p class="text-sm text-base-content/60">{profile.email}</p>
                                <div class="modal-action">
                                    <button class="btn btn-ghost" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                                    <button class="btn btn-primary" on:click=on_save>"Save"</button>
                                </div>
                            </div>
                        }.into_any()
                    }
                    Some(profile) => {
                        let editable = profile.clone();
                        view! {
                            <div class="space-y-2">
                                <div class="flex items-center gap-3 mb-4">
                                    <div class="avatar placeholder">
                                        <div class="bg-primary text-primary-content rounded-full w-14">
                                            <span class="text-xl">{profile.initials()}</span>
                                        </div>
                                    </div>
                                    <div>
                                        <p class="font-semibold">{profile.full_name()}</p>
                                        <p class="text-sm text-base-content/60">{profile.email.clone()}</p>
                                    </div>
                                </div>
                                <p><span class="font-medium">"Phone: "</span>{profile.phone_no}</p>
                                <p class="flex items-center gap-2">
                                    <span class="font-medium">"Two-factor: "</span>
                                    {if profile.two_factor_activated {
                                        view! { <span class="badge badge-success gap-1"><ShieldCheck attr:class="h-3 w-3" />"Enabled"</span> }.into_any()
                                    } else {
                                        view! { <span class="badge badge-ghost">"Disabled"</span> }.into_any()
                                    }}
                                </p>
                                <p><span class="font-medium">"Member since: "</span>{format_display(&profile.created_at)}</p>
                                <div class="modal-action">
                                    <button class="btn btn-outline" on:click=move |_| start_edit(&editable)>
                                        <UserIcon attr:class="h-4 w-4" />"Edit"
                                    </button>
                                </div>
                            </div>
                        }.into_any()
                    }
                }}
            </div>
            <div class="modal-backdrop" on:click=move |_| on_close()></div>
        </div>
    }
}

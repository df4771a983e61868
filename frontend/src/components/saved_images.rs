//! 已保存图片页面
//!
//! 文件夹列表与文件夹详情两个视图，详情中的图片按页展示。

use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::organizer::paginate;
use plantguard::shared::date::format_display;
use plantguard::shared::{Folder, SavedImage};
use web_sys::HtmlInputElement;

use crate::auth::use_auth;
use crate::components::icons::{ArrowLeft, ChevronLeft, ChevronRight, FolderIcon, FolderPlus, Trash2, Upload};
use crate::notify::use_notifier;
use crate::organizer::use_organizer;
use crate::web::read_file;

const IMAGES_PER_PAGE: usize = 12;

#[component]
pub fn SavedImagesPage() -> impl IntoView {
    let state = use_organizer().state;
    let open_folder = RwSignal::new(Option::<String>::None);

    // 打开的文件夹被删除后回到列表
    let current = Memo::new(move |_| {
        let id = open_folder.get()?;
        state.with(|s| s.folder(&id).cloned())
    });

    view! {
        {move || match current.get() {
            Some(folder) => view! {
                <FolderDetail folder=folder on_back=move || open_folder.set(None) />
            }.into_any(),
            None => view! {
                <FolderList on_open=move |id| open_folder.set(Some(id)) />
            }.into_any(),
        }}
    }
}

#[component]
fn FolderList(on_open: impl Fn(String) + Copy + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let organizer = use_organizer();
    let notifier = use_notifier();
    let state = organizer.state;

    let new_name = RwSignal::new(String::new());
    let (is_creating, set_is_creating) = signal(false);

    let on_create = {
        let auth = auth.clone();
        let store = organizer.store.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let name = new_name.get_untracked();
            let api = auth.api.clone();
            let store = store.clone();
            set_is_creating.set(true);
            spawn_local(async move {
                match store.create_folder(&*api, &name).await {
                    Ok(folder) => {
                        notifier.success(format!("Folder \"{}\" created", folder.name));
                        new_name.set(String::new());
                    }
                    Err(e) => notifier.rejection(&e),
                }
                set_is_creating.set(false);
            });
        }
    };

    let on_delete = {
        let store = organizer.store.clone();
        move |id: String| {
            let api = auth.api.clone();
            let store = store.clone();
            spawn_local(async move {
                match store.delete_folder(&*api, &id).await {
                    Ok(()) => notifier.success("Folder deleted"),
                    Err(e) => notifier.rejection(&e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col sm:flex-row sm:items-end justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">"Saved Images"</h1>
                    <p class="text-base-content/70">"Organize your plant photos into folders"</p>
                </div>
                <form class="join" on:submit=on_create>
                    <input
                        type="text"
                        placeholder="New folder name"
                        on:input=move |ev| new_name.set(event_target_value(&ev))
                        prop:value=new_name
                        class="input input-bordered join-item"
                    />
                    <button class="btn btn-primary join-item gap-2" disabled=move || is_creating.get()>
                        <FolderPlus attr:class="h-4 w-4" />"Create"
                    </button>
                </form>
            </div>

            <Show when=move || state.with(|s| s.is_loading)>
                <div class="flex justify-center py-4">
                    <span class="loading loading-spinner loading-md"></span>
                </div>
            </Show>

            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                {move || {
                    let on_delete = on_delete.clone();
                    state.with(|s| {
                        s.folders
                            .iter()
                            .map(|folder| {
                                let count = s.images_in(&folder.id).len();
                                view! {
                                    <FolderCard
                                        folder=folder.clone()
                                        count=count
                                        on_open=on_open
                                        on_delete=on_delete.clone()
                                    />
                                }
                            })
                            .collect_view()
                    })
                }}
            </div>
        </div>
    }
}

#[component]
fn FolderCard(
    folder: Folder,
    count: usize,
    on_open: impl Fn(String) + Copy + Send + Sync + 'static,
    on_delete: impl Fn(String) + Clone + Send + Sync + 'static,
) -> impl IntoView {
    let id = folder.id.clone();
    let delete_id = folder.id.clone();
    let created = (!folder.created_at.is_empty()).then(|| format_display(&folder.created_at));

    view! {
        <div class="card bg-base-100 shadow hover:shadow-md transition-shadow">
            <div class="card-body p-4">
                <div class="flex items-start justify-between gap-2">
                    <button class="flex items-center gap-3 text-left flex-1" on:click=move |_| on_open(id.clone())>
                        <div class="p-2 bg-primary/10 rounded-lg text-primary">
                            <FolderIcon attr:class="h-6 w-6" />
                        </div>
                        <div>
                            <p class="font-semibold">{folder.name.clone()}</p>
                            <p class="text-xs text-base-content/60">
                                {format!("{} images", count)}
                                {created.map(|d| format!(" · {}", d))}
                            </p>
                        </div>
                    </button>
                    {if folder.is_default {
                        view! { <span class="badge badge-ghost badge-sm">"Default"</span> }.into_any()
                    } else {
                        view! {
                            <button
                                class="btn btn-ghost btn-sm btn-square text-error"
                                on:click=move |_| on_delete(delete_id.clone())
                            >
                                <Trash2 attr:class="h-4 w-4" />
                            </button>
                        }.into_any()
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn FolderDetail(folder: Folder, on_back: impl Fn() + Copy + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let organizer = use_organizer();
    let notifier = use_notifier();
    let state = organizer.state;
    let config = auth.api.config().clone();

    let folder_id = folder.id.clone();
    let is_default = folder.is_default;
    let (page, set_page) = signal(1usize);
    let (is_uploading, set_is_uploading) = signal(false);

    let current_page = {
        let folder_id = folder_id.clone();
        Memo::new(move |_| {
            let images = state.with(|s| s.images_in(&folder_id));
            paginate(&images, page.get(), IMAGES_PER_PAGE)
        })
    };

    let on_upload = {
        let api = auth.api.clone();
        let store = organizer.store.clone();
        let folder_id = folder_id.clone();
        move |ev: leptos::ev::Event| {
            let input = event_target::<HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");

            let api = api.clone();
            let store = store.clone();
            let folder_id = folder_id.clone();
            set_is_uploading.set(true);
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(upload) => {
                        let outcome = match upload.validate() {
                            Ok(()) => {
                                store
                                    .upload_image(&*api, &folder_id, &upload.name, &upload.content_type, upload.bytes)
                                    .await
                            }
                            Err(e) => Err(e),
                        };
                        match outcome {
                            Ok(_) => notifier.success("Image uploaded"),
                            Err(e) => notifier.rejection(&e),
                        }
                    }
                    Err(e) => {
                        plantguard::log_warn!("[SavedImages] {}", e);
                        notifier.error("Failed to read image");
                    }
                }
                set_is_uploading.set(false);
            });
        }
    };

    let on_delete_image = {
        let store = organizer.store.clone();
        move |image: SavedImage| {
            let api = auth.api.clone();
            let store = store.clone();
            spawn_local(async move {
                match store.delete_image(&*api, &image.id).await {
                    Ok(()) => notifier.success("Image deleted"),
                    Err(e) => notifier.rejection(&e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between gap-4">
                <div class="flex items-center gap-3">
                    <button class="btn btn-ghost btn-sm btn-square" on:click=move |_| on_back()>
                        <ArrowLeft attr:class="h-5 w-5" />
                    </button>
                    <div>
                        <h1 class="text-2xl font-bold">{folder.name.clone()}</h1>
                        <p class="text-sm text-base-content/60">
                            {move || format!("{} images", current_page.with(|p| p.total_items))}
                        </p>
                    </div>
                </div>
                {(!is_default).then(|| view! {
                    <label class="btn btn-primary gap-2" class:btn-disabled=move || is_uploading.get()>
                        <Upload attr:class="h-4 w-4" />
                        {move || if is_uploading.get() { "Uploading..." } else { "Upload Image" }}
                        <input type="file" accept="image/*" class="hidden" on:change=on_upload.clone() />
                    </label>
                })}
            </div>

            <Show
                when=move || current_page.with(|p| p.total_items > 0)
                fallback=|| view! {
                    <div class="text-center py-16 text-base-content/50">"This folder is empty"</div>
                }
            >
                <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 gap-4">
                    {
                        let config = config.clone();
                        let on_delete_image = on_delete_image.clone();
                        move || {
                            current_page
                                .get()
                                .items
                                .into_iter()
                                .map(|image| {
                                    let src = config.asset_url(&image.image_url);
                                    let on_delete_image = on_delete_image.clone();
                                    let name = image.name.clone();
                                    view! {
                                        <div class="group relative aspect-square rounded-lg overflow-hidden bg-base-200">
                                            <img src=src alt=name.clone() class="w-full h-full object-cover" loading="lazy" />
                                            <div class="absolute inset-x-0 bottom-0 bg-black/50 text-white text-xs px-2 py-1 truncate">
                                                {name}
                                            </div>
                                            {(!is_default).then(|| view! {
                                                <button
                                                    class="btn btn-error btn-xs btn-square absolute top-2 right-2 opacity-0 group-hover:opacity-100"
                                                    on:click=move |_| on_delete_image(image.clone())
                                                >
                                                    <Trash2 attr:class="h-3 w-3" />
                                                </button>
                                            })}
                                        </div>
                                    }
                                })
                                .collect_view()
                        }
                    }
                </div>

                <Show when=move || current_page.with(|p| p.total_pages > 1)>
                    <div class="flex items-center justify-center gap-4">
                        <button
                            class="btn btn-sm btn-square"
                            disabled=move || !current_page.with(|p| p.has_prev())
                            on:click=move |_| set_page.set(current_page.with_untracked(|p| p.page) - 1)
                        >
                            <ChevronLeft attr:class="h-4 w-4" />
                        </button>
                        <span class="text-sm">
                            {move || current_page.with(|p| format!("Page {} of {}", p.page, p.total_pages))}
                        </span>
                        <button
                            class="btn btn-sm btn-square"
                            disabled=move || !current_page.with(|p| p.has_next())
                            on:click=move |_| set_page.set(current_page.with_untracked(|p| p.page) + 1)
                        >
                            <ChevronRight attr:class="h-4 w-4" />
                        </button>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

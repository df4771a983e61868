use leptos::prelude::*;
use leptos::task::spawn_local;
use plantguard::classify::{self, ImageSource, UploadFile};
use plantguard::shared::{Prediction, SavedImage};
use web_sys::{File, HtmlInputElement};

use crate::auth::use_auth;
use crate::components::icons::{FolderIcon, ImageIcon, Upload, X};
use crate::components::markdown::Markdown;
use crate::notify::use_notifier;
use crate::organizer::use_organizer;
use crate::web::{object_url, read_file, revoke_object_url};

/// 当前预览图；`owned` 为 true 时是本地对象地址，替换时需要释放
#[derive(Clone, PartialEq)]
struct Preview {
    url: String,
    owned: bool,
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let organizer = use_organizer();
    let notifier = use_notifier();

    let source = RwSignal::new(Option::<ImageSource>::None);
    let preview = RwSignal::new(Option::<Preview>::None);
    let result = RwSignal::new(Option::<Prediction>::None);
    let (is_analyzing, set_is_analyzing) = signal(false);
    let (is_dragging, set_is_dragging) = signal(false);
    let (show_picker, set_show_picker) = signal(false);
    // 每次重新选图或提交都会递增，过期的识别结果直接丢弃
    let generation = StoredValue::new(0u64);

    let replace_preview = move |next: Option<Preview>| {
        if let Some(Preview { url, owned: true }) = preview.get_untracked() {
            revoke_object_url(&url);
        }
        preview.set(next);
    };
    on_cleanup(move || {
        if let Some(Preview { url, owned: true }) = preview.get_untracked() {
            revoke_object_url(&url);
        }
    });

    let select = move |next: ImageSource, next_preview: Option<Preview>| {
        generation.update_value(|g| *g += 1);
        set_is_analyzing.set(false);
        result.set(None);
        source.set(Some(next));
        replace_preview(next_preview);
    };

    let load_file = move |file: File| {
        spawn_local(async move {
            let upload: UploadFile = match read_file(&file).await {
                Ok(upload) => upload,
                Err(e) => {
                    plantguard::log_warn!("[Dashboard] {}", e);
                    notifier.error("Failed to read image");
                    return;
                }
            };
            if let Err(e) = upload.validate() {
                notifier.client_error(&e);
                return;
            }
            let url = object_url(&file).map(|url| Preview { url, owned: true });
            select(ImageSource::Device(upload), url);
        });
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            load_file(file);
        }
        input.set_value("");
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_is_dragging.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            load_file(file);
        }
    };

    let pick_saved = {
        let api = auth.api.clone();
        move |image: SavedImage| {
            let url = api.config().asset_url(&image.image_url);
            select(ImageSource::Saved(image), Some(Preview { url, owned: false }));
            set_show_picker.set(false);
        }
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        set_is_analyzing.set(false);
        source.set(None);
        result.set(None);
        replace_preview(None);
    };

    let on_analyze = move |_| {
        let Some(selected) = source.get_untracked() else {
            notifier.error("Please select an image first");
            return;
        };
        generation.update_value(|g| *g += 1);
        let ticket = generation.get_value();

        set_is_analyzing.set(true);
        result.set(None);
        let api = auth.api.clone();
        spawn_local(async move {
            let outcome = classify::classify(&*api, selected).await;
            if generation.get_value() != ticket {
                return;
            }
            match outcome {
                Ok(prediction) => result.set(Some(prediction)),
                Err(e) => notifier.rejection(&e),
            }
            set_is_analyzing.set(false);
        });
    };

    let state = organizer.state;

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Plant Disease Detection"</h1>
                <p class="text-base-content/70">"Upload a photo of a leaf to identify diseases"</p>
            </div>

            <div class="grid gap-6 lg:grid-cols-2">
                // 选图区域
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Upload Image"</h2>
                        {move || match preview.get() {
                            Some(p) => view! {
                                <div class="relative">
                                    <img src=p.url alt="Selected plant" class="w-full max-h-80 object-contain rounded-lg bg-base-200" />
                                    <button class="btn btn-circle btn-sm absolute top-2 right-2" on:click=clear>
                                        <X attr:class="h-4 w-4" />
                                    </button>
                                </div>
                            }.into_any(),
                            None => view! {
                                <label
                                    class=move || if is_dragging.get() {
                                        "flex flex-col items-center justify-center gap-3 h-64 border-2 border-dashed border-primary bg-primary/5 rounded-lg cursor-pointer"
                                    } else {
                                        "flex flex-col items-center justify-center gap-3 h-64 border-2 border-dashed border-base-300 rounded-lg cursor-pointer hover:border-primary"
                                    }
                                    on:dragover=move |ev: leptos::ev::DragEvent| {
                                        ev.prevent_default();
                                        set_is_dragging.set(true);
                                    }
                                    on:dragleave=move |_| set_is_dragging.set(false)
                                    on:drop=on_drop
                                >
                                    <Upload attr:class="h-10 w-10 text-base-content/40" />
                                    <span class="font-medium">"Drag & drop an image or click to browse"</span>
                                    <span class="text-xs text-base-content/50">"PNG, JPG up to 10MB"</span>
                                    <input type="file" accept="image/*" class="hidden" on:change=on_file_change />
                                </label>
                            }.into_any(),
                        }}

                        <div class="flex gap-2 mt-4">
                            <button
                                class="btn btn-outline flex-1 gap-2"
                                on:click=move |_| set_show_picker.update(|v| *v = !*v)
                            >
                                <FolderIcon attr:class="h-4 w-4" />"Choose from Saved"
                            </button>
                            <button
                                class="btn btn-primary flex-1"
                                on:click=on_analyze
                                disabled=move || is_analyzing.get() || source.with(Option::is_none)
                            >
                                {move || if is_analyzing.get() {
                                    view! { <span class="loading loading-spinner"></span> "Analyzing..." }.into_any()
                                } else {
                                    "Analyze".into_any()
                                }}
                            </button>
                        </div>

                        <Show when=move || show_picker.get()>
                            <SavedImagePicker on_pick=pick_saved.clone() />
                        </Show>
                    </div>
                </div>

                // 识别结果
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Analysis Result"</h2>
                        {move || match result.get() {
                            Some(prediction) => {
                                let description = prediction.description.clone();
                                view! {
                                    <div class="space-y-4">
                                        <div class="flex items-center justify-between gap-4">
                                            <span class="text-xl font-semibold">{prediction.disease.clone()}</span>
                                            <span class="badge badge-primary badge-lg">{prediction.confidence_label()}</span>
                                        </div>
                                        <Markdown source=Signal::derive(move || description.clone()) />
                                    </div>
                                }.into_any()
                            }
                            None => view! {
                                <div class="flex flex-col items-center justify-center h-64 text-base-content/50 gap-2">
                                    <ImageIcon attr:class="h-10 w-10" />
                                    <p>"Select an image and click Analyze to see results"</p>
                                </div>
                            }.into_any(),
                        }}
                    </div>
                </div>
            </div>

            // 文件夹加载中时提示
            <Show when=move || state.with(|s| s.is_loading)>
                <p class="text-sm text-base-content/50">"Syncing saved folders..."</p>
            </Show>
        </div>
    }
}

/// 从已保存的文件夹中挑选图片
#[component]
fn SavedImagePicker(on_pick: impl Fn(SavedImage) + Clone + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let state = use_organizer().state;
    let folder_id = RwSignal::new(
        state.with_untracked(|s| s.folders.first().map(|f| f.id.clone()).unwrap_or_default()),
    );

    let images = move || state.with(|s| s.images_in(&folder_id.get()));

    view! {
        <div class="mt-4 space-y-3 border-t border-base-300 pt-4">
            <select
                class="select select-bordered w-full"
                on:change=move |ev| folder_id.set(event_target_value(&ev))
                prop:value=folder_id
            >
                {move || state.with(|s| {
                    s.folders
                        .iter()
                        .map(|f| view! { <option value=f.id.clone()>{f.name.clone()}</option> })
                        .collect_view()
                })}
            </select>
            <div class="grid grid-cols-3 sm:grid-cols-4 gap-2 max-h-64 overflow-y-auto">
                {move || {
                    let on_pick = on_pick.clone();
                    let config = auth.api.config().clone();
                    images()
                        .into_iter()
                        .map(|image| {
                            let on_pick = on_pick.clone();
                            let src = config.asset_url(&image.image_url);
                            let name = image.name.clone();
                            view! {
                                <button
                                    class="aspect-square rounded-lg overflow-hidden border border-base-300 hover:ring-2 hover:ring-primary"
                                    on:click=move |_| on_pick(image.clone())
                                >
                                    <img src=src alt=name class="w-full h-full object-cover" />
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

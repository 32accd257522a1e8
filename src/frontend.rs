use gloo_file::FileList;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::filter::{FilterPatch, TypeCategory};
use crate::permissions::{can_delete, can_edit, can_manage_users};
use crate::settings::{SettingKey, Theme};
use crate::storage::{format_bytes, UsageLevel};
use crate::upload::{TickOutcome, UploadSource, UploadStatus, UploadTask};
use crate::users::DEMO_PASSWORD;
use crate::{DashboardConfig, FileRecord, Role, SessionState, SortDirection, SortField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Files,
    Shared,
    Upload,
    Users,
    Storage,
    Settings,
}

impl Section {
    const ALL: [Section; 6] = [
        Section::Files,
        Section::Shared,
        Section::Upload,
        Section::Users,
        Section::Storage,
        Section::Settings,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Files => "my files",
            Section::Shared => "shared with me",
            Section::Upload => "upload",
            Section::Users => "user management",
            Section::Storage => "storage",
            Section::Settings => "settings",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let session = create_rw_signal(SessionState::demo(DashboardConfig::default()));
    let (section, set_section) = create_signal(Section::Files);

    // Pick up limits and the debug flag from the host
    create_effect(move |_| {
        spawn_local(async move {
            match load_config().await {
                Ok(config) => {
                    if config.debug {
                        web_sys::console::log_1(&format!("Dashboard config: {:?}", config).into());
                    }
                    ::log::set_max_level(config.log_level());
                    session.update(|s| s.apply_config(config));
                }
                Err(e) => {
                    web_sys::console::log_1(&format!("Using default config: {}", e).into());
                }
            }
        });
    });

    let signed_in = move || session.with(|s| s.current_user().is_some());
    let app_class = move || match session.with(|s| s.settings().theme) {
        Theme::Light => "app light",
        Theme::Dark => "app dark",
    };

    view! {
        <Title text="filedeck" />
        <div class=app_class>
            <StyleProvider />
            <Show
                when=signed_in
                fallback=move || view! { <LoginForm session=session /> }
            >
                <div class="dashboard">
                    <Sidebar session=session section=section set_section=set_section />
                    <main class="content">
                        {move || match section.get() {
                            Section::Files => view! { <FilesSection session=session /> }.into_view(),
                            Section::Shared => view! { <SharedSection session=session /> }.into_view(),
                            Section::Upload => view! { <UploadSection session=session /> }.into_view(),
                            Section::Users => view! { <UsersSection session=session /> }.into_view(),
                            Section::Storage => view! { <StorageSection session=session /> }.into_view(),
                            Section::Settings => view! { <SettingsSection session=session /> }.into_view(),
                        }}
                    </main>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn LoginForm(session: RwSignal<SessionState>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (login_error, set_login_error) = create_signal(None::<String>);

    let on_submit = move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();

        let result = session
            .try_update(|s| s.sign_in(&email_val, &password_val).map(|u| u.name.clone()));
        match result {
            Some(Ok(name)) => {
                web_sys::console::log_1(&format!("Signed in as {}", name).into());
                set_login_error.set(None);
                set_password.set(String::new());
            }
            Some(Err(err)) => set_login_error.set(Some(err.to_string())),
            None => {}
        }
    };

    let demo_accounts = move || {
        session.with(|s| {
            s.directory()
                .users()
                .iter()
                .map(|u| {
                    view! {
                        <div class="credential-item">
                            <span class="credential-value">{u.email.clone()}</span>
                            <span class="credential-label">{u.role.label()}</span>
                        </div>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div class="login-grid">
            <div class="login-header border-container">
                <h1>"filedeck"</h1>
                <p>"file storage dashboard"</p>
            </div>

            <div class="login-form-section border-container">
                <Show when=move || login_error.get().is_some()>
                    <div class="login-error border-container">
                        {move || login_error.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-field">
                        <label class="field-label">"email"</label>
                        <input
                            type="email"
                            class="text-input border-container"
                            prop:value=move || email.get()
                            on:input=move |e| set_email.set(event_target_value(&e))
                            placeholder="you@company.com"
                            required
                        />
                    </div>
                    <div class="form-field">
                        <label class="field-label">"password"</label>
                        <input
                            type="password"
                            class="text-input border-container"
                            prop:value=move || password.get()
                            on:input=move |e| set_password.set(event_target_value(&e))
                            placeholder="enter password"
                            required
                        />
                    </div>
                    <button type="submit" class="primary-btn border-container">
                        "sign in"
                    </button>
                </form>
            </div>

            <div class="login-info border-container">
                <h3>"demo accounts"</h3>
                {demo_accounts}
                <div class="credential-item">
                    <span class="credential-label">"password:"</span>
                    <span class="credential-value">{DEMO_PASSWORD}</span>
                </div>
            </div>
        </div>
    }
}

#[component]
fn Sidebar(
    session: RwSignal<SessionState>,
    section: ReadSignal<Section>,
    set_section: WriteSignal<Section>,
) -> impl IntoView {
    let profile = move || {
        session.with(|s| {
            s.current_user().map(|u| {
                view! {
                    <div class="profile">
                        <div class="profile-name">{u.name.clone()}</div>
                        <div class="profile-email">{u.email.clone()}</div>
                        <span class="role-badge">{u.role.label()}</span>
                    </div>
                }
            })
        })
    };

    let nav_items = move || {
        let is_admin = session.with(|s| s.current_user().map(can_manage_users).unwrap_or(false));
        Section::ALL
            .into_iter()
            .filter(|item| *item != Section::Users || is_admin)
            .map(|item| {
                let class = move || {
                    if section.get() == item {
                        "nav-item active"
                    } else {
                        "nav-item"
                    }
                };
                view! {
                    <button type="button" class=class on:click=move |_| set_section.set(item)>
                        {item.label()}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <aside class="sidebar border-container">
            <div class="brand">"filedeck"</div>
            {profile}
            <nav class="nav">{nav_items}</nav>
            <div class="sidebar-footer">
                <button
                    type="button"
                    class="nav-item"
                    on:click=move |_| session.update(|s| {
                        s.settings_mut().toggle_theme();
                    })
                >
                    {move || match session.with(|s| s.settings().theme) {
                        Theme::Light => "dark mode",
                        Theme::Dark => "light mode",
                    }}
                </button>
                <button
                    type="button"
                    class="nav-item"
                    on:click=move |_| {
                        session.update(|s| {
                            s.sign_out();
                        });
                        set_section.set(Section::Files);
                    }
                >
                    "sign out"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn FilesSection(session: RwSignal<SessionState>) -> impl IntoView {
    let files = Signal::derive(move || session.with(|s| s.visible_files()));
    let counts = move || {
        let counts = session.with(|s| s.counts());
        format!("{} of {} files", counts.shown, counts.total)
    };

    view! {
        <div>
            <div class="section-header">
                <h2>"my files"</h2>
                <span class="muted">{counts}</span>
            </div>
            <FilterBar session=session />
            <FileTable session=session files=files />
        </div>
    }
}

#[component]
fn SharedSection(session: RwSignal<SessionState>) -> impl IntoView {
    let files = Signal::derive(move || session.with(|s| s.sort_spec().sorted(&s.shared_with_me())));

    view! {
        <div>
            <div class="section-header">
                <h2>"shared with me"</h2>
                <span class="muted">{move || format!("{} files", files.get().len())}</span>
            </div>
            <p class="muted">"files that have been shared with you by other users"</p>
            <FileTable session=session files=files />
        </div>
    }
}

#[component]
fn FilterBar(session: RwSignal<SessionState>) -> impl IntoView {
    let tag_chips = move || {
        session
            .with(|s| s.known_tags())
            .into_iter()
            .map(|tag| {
                let active = session.with(|s| s.criteria().tags.contains(&tag));
                let class = if active { "chip active" } else { "chip" };
                let toggle = tag.clone();
                view! {
                    <button
                        type="button"
                        class=class
                        on:click=move |_| session.update(|s| s.toggle_tag_filter(&toggle))
                    >
                        {tag}
                    </button>
                }
            })
            .collect_view()
    };

    let category_chips = TypeCategory::ALL
        .into_iter()
        .map(|category| {
            let class = move || {
                if session.with(|s| s.criteria().categories.contains(&category)) {
                    "chip active"
                } else {
                    "chip"
                }
            };
            view! {
                <button
                    type="button"
                    class=class
                    on:click=move |_| session.update(|s| s.toggle_category_filter(category))
                >
                    {category.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="filter-bar border-container">
            <input
                type="text"
                class="text-input border-container"
                placeholder="search files..."
                prop:value=move || session.with(|s| s.criteria().search.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.set_filters(FilterPatch::search(value)));
                }
            />
            <div class="chip-row">
                <span class="muted">"tags:"</span>
                {tag_chips}
            </div>
            <div class="chip-row">
                <span class="muted">"types:"</span>
                {category_chips}
            </div>
            <Show when=move || session.with(|s| s.criteria().is_active())>
                <button
                    type="button"
                    class="action-btn border-container"
                    on:click=move |_| session.update(|s| s.clear_filters())
                >
                    "clear filters"
                </button>
            </Show>
        </div>
    }
}

#[component]
fn SortHeader(session: RwSignal<SessionState>, field: SortField) -> impl IntoView {
    let indicator = move || {
        let spec = session.with(|s| s.sort_spec());
        if spec.field != field {
            ""
        } else if spec.direction == SortDirection::Asc {
            " ↑"
        } else {
            " ↓"
        }
    };

    view! {
        <th
            class="sortable"
            on:click=move |_| session.update(|s| {
                s.toggle_sort(field);
            })
        >
            {field.label()}
            {indicator}
        </th>
    }
}

#[component]
fn FileTable(session: RwSignal<SessionState>, files: Signal<Vec<FileRecord>>) -> impl IntoView {
    view! {
        <Show
            when=move || !files.get().is_empty()
            fallback=|| view! {
                <div class="empty-state">
                    <div class="empty-icon">"[ ]"</div>
                    <div>"no files found"</div>
                </div>
            }
        >
            <table class="file-table border-container">
                <thead>
                    <tr>
                        <SortHeader session=session field=SortField::Name />
                        <SortHeader session=session field=SortField::Size />
                        <SortHeader session=session field=SortField::Type />
                        <th>"access"</th>
                        <SortHeader session=session field=SortField::Modified />
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || files.get()
                        key=|file| (file.id.clone(), file.shared, file.download_count)
                        let:file
                    >
                        <FileRow session=session file=file />
                    </For>
                </tbody>
            </table>
        </Show>
    }
}

#[component]
fn FileRow(session: RwSignal<SessionState>, file: FileRecord) -> impl IntoView {
    let (editable, deletable) = session.with_untracked(|s| {
        s.current_user()
            .map(|u| (can_edit(u, &file), can_delete(u, &file)))
            .unwrap_or((false, false))
    });

    let download_id = file.id.clone();
    let share_id = file.id.clone();
    let delete_id = file.id.clone();
    let (share_class, share_label) = if file.shared {
        ("action-btn active border-container", "shared")
    } else {
        ("action-btn border-container", "share")
    };

    let tags = file
        .tags
        .iter()
        .map(|tag| view! { <span class="tag">{tag.clone()}</span> })
        .collect_view();

    view! {
        <tr>
            <td>
                <div class="file-name">{file.name.clone()}</div>
                <div class="muted small">
                    {format!("v{} • {} downloads", file.version, file.download_count)}
                </div>
                <div>{tags}</div>
            </td>
            <td>{format_bytes(file.size)}</td>
            <td class="muted">{file.file_type.clone()}</td>
            <td>{file.access_level.label()}</td>
            <td class="muted">{file.uploaded_at.format("%b %d, %Y %H:%M").to_string()}</td>
            <td class="row-actions">
                <button
                    type="button"
                    class="action-btn border-container"
                    on:click=move |_| session.update(|s| {
                        s.record_download(&download_id);
                    })
                >
                    "download"
                </button>
                <Show when=move || editable>
                    <button
                        type="button"
                        class=share_class
                        on:click={
                            let id = share_id.clone();
                            move |_| session.update(|s| {
                                s.toggle_share(&id);
                            })
                        }
                    >
                        {share_label}
                    </button>
                </Show>
                <Show when=move || deletable>
                    <button
                        type="button"
                        class="action-btn delete-btn border-container"
                        on:click={
                            let id = delete_id.clone();
                            move |_| session.update(|s| {
                                s.remove_file(&id);
                            })
                        }
                    >
                        "delete"
                    </button>
                </Show>
            </td>
        </tr>
    }
}

#[component]
fn UploadSection(session: RwSignal<SessionState>) -> impl IntoView {
    let (tags, set_tags) = create_signal(String::new());
    let (drag_over, set_drag_over) = create_signal(false);
    let file_input_ref = create_node_ref::<leptos::html::Input>();

    let queue_files = move |files: web_sys::FileList| {
        let sources: Vec<UploadSource> = FileList::from(files)
            .iter()
            .map(|f| UploadSource::new(f.name(), f.size(), f.raw_mime_type()))
            .collect();
        web_sys::console::log_1(&format!("Queued {} files", sources.len()).into());

        let tag_text = tags.get_untracked();
        let ids = session
            .try_update(|s| s.enqueue_uploads(sources, &tag_text))
            .unwrap_or_default();
        let cleanup_ms = session.with_untracked(|s| s.uploads().limits().cleanup_delay_ms);

        for id in ids {
            let rejected = session.with_untracked(|s| {
                s.uploads()
                    .get(id)
                    .map(|t| t.status == UploadStatus::Error)
                    .unwrap_or(false)
            });
            if rejected {
                spawn_local(remove_after(session, id, cleanup_ms));
            }
        }
    };

    let on_file_change = move |_ev: web_sys::Event| {
        if let Some(input) = file_input_ref.get_untracked() {
            if let Some(files) = input.files() {
                queue_files(files);
            }
            input.set_value("");
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_drag_over.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            if files.length() > 0 {
                queue_files(files);
            }
        }
    };

    let on_upload_click = move |_| {
        let tag_text = tags.get_untracked();
        let started = session
            .try_update(|s| s.start_uploads(Some(&tag_text)))
            .unwrap_or_default();
        let limits = session.with_untracked(|s| s.uploads().limits().clone());
        web_sys::console::log_1(&format!("Starting {} uploads", started.len()).into());

        for id in started {
            spawn_local(drive_upload(
                session,
                id,
                limits.tick_interval_ms,
                limits.cleanup_delay_ms,
            ));
        }
    };

    let pending = move || session.with(|s| s.uploads().pending_count());
    let zone_class = move || {
        if drag_over.get() {
            "drop-zone border-container drag-over"
        } else {
            "drop-zone border-container"
        }
    };
    let zone_text = move || {
        if drag_over.get() {
            "drop files here"
        } else {
            "drag and drop files here"
        }
    };
    let max_mb = move || session.with(|s| s.uploads().limits().max_file_size_mb());

    view! {
        <div>
            <div class="section-header">
                <h2>"upload files"</h2>
            </div>
            <div
                class=zone_class
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    set_drag_over.set(true);
                }
                on:dragleave=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    set_drag_over.set(false);
                }
                on:drop=on_drop
            >
                <div>{zone_text}</div>
                <div class="muted small">{move || format!("max {} MB per file", max_mb())}</div>
                <input
                    type="file"
                    multiple
                    style="display: none;"
                    node_ref=file_input_ref
                    on:change=on_file_change
                />
                <button
                    type="button"
                    class="action-btn border-container"
                    on:click=move |_| {
                        if let Some(input) = file_input_ref.get_untracked() {
                            input.click();
                        }
                    }
                >
                    "choose files"
                </button>
            </div>

            <div class="form-field">
                <label class="field-label">"tags (comma separated)"</label>
                <input
                    type="text"
                    class="text-input border-container"
                    placeholder="design, client, urgent"
                    prop:value=move || tags.get()
                    on:input=move |e| set_tags.set(event_target_value(&e))
                />
            </div>

            <button
                type="button"
                class="primary-btn border-container"
                disabled=move || pending() == 0
                on:click=on_upload_click
            >
                {move || format!("upload {} files", pending())}
            </button>

            <div class="upload-list">
                <For
                    each=move || session.with(|s| s.uploads().tasks().to_vec())
                    key=|task| (task.id, task.progress, task.status)
                    let:task
                >
                    <UploadRow session=session task=task />
                </For>
            </div>
        </div>
    }
}

#[component]
fn UploadRow(session: RwSignal<SessionState>, task: UploadTask) -> impl IntoView {
    let id = task.id;
    let uploading = task.status == UploadStatus::Uploading;
    let progress = task.progress;
    let status = match task.status {
        UploadStatus::Pending => "pending",
        UploadStatus::Uploading => "uploading",
        UploadStatus::Completed => "completed",
        UploadStatus::Error => "error",
    };

    view! {
        <div class="upload-item border-container">
            <div class="upload-row">
                <span class="file-name">{task.source.name}</span>
                <span class="muted small">{format_bytes(task.source.size)}</span>
                <span class=format!("status status-{}", status)>{status}</span>
                <button
                    type="button"
                    class="action-btn border-container"
                    on:click=move |_| session.update(|s| {
                        s.remove_upload(id);
                    })
                >
                    "x"
                </button>
            </div>
            {task.error.map(|err| view! { <div class="login-error">{err}</div> })}
            <Show when=move || uploading>
                <div class="progress-bar">
                    <div class="progress-fill" style=format!("width: {}%", progress)></div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn UsersSection(session: RwSignal<SessionState>) -> impl IntoView {
    let rows = move || {
        session.with(|s| {
            s.directory()
                .users()
                .iter()
                .map(|u| {
                    view! {
                        <tr>
                            <td>{u.name.clone()}</td>
                            <td class="muted">{u.email.clone()}</td>
                            <td><span class="role-badge">{u.role.label()}</span></td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let role_counts = move || {
        Role::ALL
            .into_iter()
            .map(|role| {
                let count = session.with(|s| s.directory().count_by_role(role));
                view! {
                    <div class="stat-box border-container">
                        <div class="stat-value">{count}</div>
                        <div class="stat-label">{format!("{}s", role.label().to_lowercase())}</div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div>
            <div class="section-header">
                <h2>"user management"</h2>
                <span class="muted">{move || format!("{} users", session.with(|s| s.directory().users().len()))}</span>
            </div>
            <div class="storage-stats-grid">{role_counts}</div>
            <table class="file-table border-container">
                <thead>
                    <tr><th>"name"</th><th>"email"</th><th>"role"</th></tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[component]
fn StorageSection(session: RwSignal<SessionState>) -> impl IntoView {
    let summary = create_memo(move |_| session.with(|s| s.storage_summary()));
    let user_count = move || session.with(|s| s.directory().users().len());

    let fill_class = move || match summary.get().level {
        UsageLevel::Normal => "progress-fill",
        UsageLevel::Warning => "progress-fill warning",
        UsageLevel::Critical => "progress-fill critical",
    };

    let breakdown = move || {
        summary
            .get()
            .breakdown
            .into_iter()
            .map(|usage| {
                view! {
                    <div class="breakdown-row">
                        <span>{usage.bucket.label()}</span>
                        <span class="muted">
                            {format!("{} ({:.1}%)", format_bytes(usage.bytes), usage.percentage)}
                        </span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div>
            <div class="section-header">
                <h2>"storage"</h2>
                <span class="muted">"monitor your storage usage and statistics"</span>
            </div>
            <div class="storage-stats-grid">
                <div class="stat-box border-container">
                    <div class="stat-value">{move || summary.get().formatted_used()}</div>
                    <div class="stat-label">"used space"</div>
                </div>
                <div class="stat-box border-container">
                    <div class="stat-value">{move || summary.get().total_files}</div>
                    <div class="stat-label">"total files"</div>
                </div>
                <div class="stat-box border-container">
                    <div class="stat-value">{user_count}</div>
                    <div class="stat-label">"users"</div>
                </div>
            </div>
            <div class="progress-section border-container">
                <div class="progress-bar">
                    <div
                        class=fill_class
                        style=move || format!("width: {:.1}%", summary.get().used_percentage.min(100.0))
                    ></div>
                </div>
                <div class="muted">
                    {move || {
                        let s = summary.get();
                        format!("{:.1}% of {} used", s.used_percentage, s.formatted_quota())
                    }}
                </div>
            </div>
            <div class="breakdown border-container">{breakdown}</div>
        </div>
    }
}

#[component]
fn SettingsSection(session: RwSignal<SessionState>) -> impl IntoView {
    let profile = move || {
        session.with(|s| {
            s.current_user().map(|u| {
                view! {
                    <div class="settings-group border-container">
                        <h3>"profile"</h3>
                        <div class="breakdown-row"><span>"full name"</span><span>{u.name.clone()}</span></div>
                        <div class="breakdown-row"><span>"email address"</span><span>{u.email.clone()}</span></div>
                    </div>
                }
            })
        })
    };

    let groups = ["Notifications", "Security", "Storage"]
        .into_iter()
        .map(|group| {
            let toggles = SettingKey::ALL
                .into_iter()
                .filter(|key| key.section() == group)
                .map(|key| {
                    view! {
                        <label class="breakdown-row">
                            <span>{key.label()}</span>
                            <input
                                type="checkbox"
                                prop:checked=move || session.with(|s| s.settings().get(key))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    session.update(|s| s.settings_mut().set(key, checked));
                                }
                            />
                        </label>
                    }
                })
                .collect_view();
            view! {
                <div class="settings-group border-container">
                    <h3>{group.to_lowercase()}</h3>
                    {toggles}
                </div>
            }
        })
        .collect_view();

    view! {
        <div>
            <div class="section-header">
                <h2>"settings"</h2>
                <span class="muted">"manage your account preferences and security settings"</span>
            </div>
            {profile}
            {groups}
        </div>
    }
}

/// Advances one simulated upload until it finishes, then drops it from the
/// queue after the cleanup delay. Stops early if the task was removed.
async fn drive_upload(session: RwSignal<SessionState>, id: Uuid, tick_ms: u32, cleanup_ms: u32) {
    loop {
        TimeoutFuture::new(tick_ms).await;
        match session.try_update(|s| s.tick_upload(id)) {
            Some(TickOutcome::Advanced(_)) => continue,
            Some(TickOutcome::Completed(task)) => {
                web_sys::console::log_1(&format!("Upload complete: {}", task.source.name).into());
                break;
            }
            _ => return,
        }
    }
    remove_after(session, id, cleanup_ms).await;
}

async fn remove_after(session: RwSignal<SessionState>, id: Uuid, delay_ms: u32) {
    TimeoutFuture::new(delay_ms).await;
    session.update(|s| {
        s.remove_upload(id);
    });
}

async fn load_config() -> Result<DashboardConfig, String> {
    let response = Request::get("/config")
        .send()
        .await
        .map_err(|e| format!("Config request failed: {:?}", e))?;

    if response.status() != 200 {
        return Err(format!("Config request failed with status: {}", response.status()));
    }

    response
        .json::<DashboardConfig>()
        .await
        .map_err(|e| format!("Failed to parse config: {:?}", e))
}

#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    if ::log::set_logger(&CONSOLE_LOGGER).is_ok() {
        ::log::set_max_level(DashboardConfig::default().log_level());
    }
    mount_to_body(|| view! { <App /> });
}

/// Forwards `log` records from the core to the browser console.
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl ::log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        metadata.level() <= ::log::max_level()
    }

    fn log(&self, record: &::log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line: JsValue = format!("[{} {}] {}", record.level(), record.target(), record.args()).into();
        match record.level() {
            ::log::Level::Error => web_sys::console::error_1(&line),
            ::log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

#[component]
fn StyleProvider() -> impl IntoView {
    view! { <style>{MAIN_STYLES}</style> }
}

// Catppuccin Mocha for dark, Latte for light
const MAIN_STYLES: &str = r#"
@import url("https://fonts.googleapis.com/css2?family=DM+Mono:ital,wght@0,300;0,400;0,500&display=swap");

.app.dark {
    --base: #1e1e2e;
    --surface: #313244;
    --text: #cdd6f4;
    --subtext: #bac2de;
    --muted: #6c7086;
    --accent: #89b4fa;
    --red: #f38ba8;
    --yellow: #f9e2af;
    --green: #a6e3a1;
}

.app.light {
    --base: #eff1f5;
    --surface: #ccd0da;
    --text: #4c4f69;
    --subtext: #5c5f77;
    --muted: #8c8fa1;
    --accent: #1e66f5;
    --red: #d20f39;
    --yellow: #df8e1d;
    --green: #40a02b;
}

body {
    margin: 0;
    font-family: "DM Mono", monospace;
    letter-spacing: -0.05ch;
}

.app {
    min-height: 100vh;
    padding: 20px;
    background-color: var(--base);
    color: var(--text);
}

.border-container {
    border: 1px solid var(--surface);
    border-radius: 6px;
}

.muted { color: var(--muted); }
.small { font-size: 12px; }

.dashboard {
    display: grid;
    grid-template-columns: 240px 1fr;
    gap: 20px;
    max-width: 1280px;
    margin: 0 auto;
}

.sidebar {
    display: flex;
    flex-direction: column;
    gap: 16px;
    padding: 20px;
}

.brand { font-size: 1.8rem; font-weight: 500; }
.profile-name { font-weight: 500; }
.profile-email { color: var(--subtext); font-size: 13px; }

.role-badge {
    display: inline-block;
    margin-top: 6px;
    padding: 2px 8px;
    border: 1px solid var(--accent);
    border-radius: 10px;
    color: var(--accent);
    font-size: 12px;
}

.nav, .sidebar-footer {
    display: flex;
    flex-direction: column;
    gap: 4px;
}

.sidebar-footer { margin-top: auto; }

.nav-item, .action-btn, .chip, .primary-btn {
    font-family: inherit;
    background: transparent;
    color: var(--text);
    cursor: pointer;
}

.nav-item {
    border: none;
    text-align: left;
    padding: 8px 10px;
    border-radius: 4px;
}

.nav-item:hover, .nav-item.active { background: var(--surface); }

.section-header {
    display: flex;
    align-items: baseline;
    justify-content: space-between;
}

.filter-bar, .progress-section, .breakdown, .settings-group {
    display: flex;
    flex-direction: column;
    gap: 10px;
    padding: 16px;
    margin-bottom: 20px;
}

.text-input {
    width: 100%;
    box-sizing: border-box;
    padding: 10px;
    font-family: inherit;
    background: transparent;
    color: var(--text);
}

.chip-row { display: flex; flex-wrap: wrap; gap: 6px; align-items: center; }

.chip {
    border: 1px solid var(--surface);
    border-radius: 12px;
    padding: 4px 10px;
}

.chip.active, .action-btn.active {
    border-color: var(--accent);
    color: var(--accent);
}

.action-btn { padding: 6px 10px; }
.delete-btn:hover { color: var(--red); border-color: var(--red); }
.primary-btn { padding: 10px 16px; margin: 10px 0; }
.primary-btn:disabled { opacity: 0.5; cursor: default; }

.file-table { width: 100%; border-collapse: collapse; }
.file-table th, .file-table td { padding: 10px; text-align: left; }
.file-table tbody tr { border-top: 1px solid var(--surface); }
.sortable { cursor: pointer; }
.file-name { font-weight: 500; word-break: break-word; }
.row-actions { display: flex; gap: 6px; justify-content: flex-end; }

.tag {
    display: inline-block;
    margin: 4px 4px 0 0;
    padding: 1px 6px;
    background: var(--surface);
    border-radius: 4px;
    font-size: 12px;
}

.empty-state { text-align: center; padding: 40px 20px; color: var(--subtext); }
.empty-icon { font-size: 32px; margin-bottom: 10px; }

.drop-zone {
    border-style: dashed;
    padding: 40px;
    text-align: center;
    display: flex;
    flex-direction: column;
    gap: 10px;
    align-items: center;
}

.drop-zone.drag-over { border-color: var(--accent); }

.upload-list { display: flex; flex-direction: column; gap: 8px; }
.upload-item { padding: 10px; }
.upload-row { display: flex; gap: 10px; align-items: center; }
.upload-row .file-name { flex: 1; }
.status-completed { color: var(--green); }
.status-error { color: var(--red); }

.progress-bar {
    height: 8px;
    background: var(--surface);
    border-radius: 4px;
    overflow: hidden;
    margin-top: 8px;
}

.progress-fill { height: 100%; background: var(--accent); }
.progress-fill.warning { background: var(--yellow); }
.progress-fill.critical { background: var(--red); }

.storage-stats-grid {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    gap: 12px;
    margin-bottom: 20px;
}

.stat-box { padding: 16px; }
.stat-value { font-size: 1.5rem; }
.stat-label { color: var(--subtext); font-size: 13px; }

.breakdown-row { display: flex; justify-content: space-between; }

.login-grid {
    display: grid;
    gap: 20px;
    max-width: 480px;
    margin: 60px auto;
}

.login-header, .login-form-section, .login-info { padding: 24px; }
.login-header h1 { margin: 0 0 10px 0; font-weight: 500; }
.form-field { margin-bottom: 15px; }
.field-label { display: block; margin-bottom: 6px; color: var(--subtext); }
.login-error { color: var(--red); padding: 8px; margin-bottom: 10px; }
.credential-item { display: flex; justify-content: space-between; margin: 4px 0; }
.credential-label { color: var(--subtext); }
"#;

use leptos::{prelude::*, task::spawn_local};

use crate::auth::admin_session;

#[derive(Clone, Copy)]
pub struct AdminContext {
    pub is_admin: ReadSignal<bool>,
    pub is_loading: ReadSignal<bool>,
    pub refresh: WriteSignal<u32>,
}

impl AdminContext {
    pub fn refresh_session(&self) {
        self.refresh.update(|v| *v = (*v + 1) % 1000);
    }
}

pub fn use_admin() -> Option<AdminContext> {
    use_context::<AdminContext>()
}

#[component]
pub fn AdminProvider(children: Children) -> impl IntoView {
    let (is_admin, set_is_admin) = signal(false);
    let (is_loading, set_is_loading) = signal(true);
    let (refresh, set_refresh) = signal(0u32);

    let admin_context = AdminContext {
        is_admin,
        is_loading,
        refresh: set_refresh,
    };

    Effect::new(move |_| {
        refresh.get();
        spawn_local(async move {
            set_is_loading.set(true);
            match admin_session().await {
                Ok(valid) => set_is_admin.set(valid),
                Err(e) => {
                    log::error!("Failed to check admin session: {e}");
                    set_is_admin.set(false);
                }
            }
            set_is_loading.set(false);
        });
    });

    provide_context(admin_context);

    view! { {children()} }
}
